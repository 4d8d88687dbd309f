//! Conversion of reply batches into typed record lists.
//!
//! Only data (`re`) sentences produce records; every other sentence is
//! skipped and traversal continues. Records borrow their strings from the
//! reply, so a list can never outlive the batch it was built from.

use crate::error::{RosError, RosResult};
use crate::reply::{Reply, Sentence};
use tracing::trace;

/// A record type that can be built from one data sentence.
///
/// Building a record never fails: malformed fields resolve to fallback
/// values inside the implementation.
pub trait FromSentence<'r>: Sized {
    /// Short name used in log output (e.g., "interface").
    const KIND: &'static str;

    fn from_sentence(sentence: &'r Sentence) -> Self;
}

/// Destination for materialized records.
///
/// Appending may fail with [`RosError::OutOfMemory`]; the store is then
/// dropped together with every record it already holds.
pub trait RecordStore<T> {
    fn try_push(&mut self, record: T) -> RosResult<()>;

    fn records(&self) -> &[T];
}

impl<T> RecordStore<T> for Vec<T> {
    fn try_push(&mut self, record: T) -> RosResult<()> {
        self.try_reserve(1).map_err(|_| RosError::OutOfMemory)?;
        self.push(record);
        Ok(())
    }

    fn records(&self) -> &[T] {
        self
    }
}

/// Materializes `reply` into `store`, preserving reply order.
pub fn materialize_into<'r, T, S>(reply: &'r Reply, mut store: S) -> RosResult<S>
where
    T: FromSentence<'r>,
    S: RecordStore<T>,
{
    for (index, sentence) in reply.iter().enumerate() {
        if !sentence.is_data() {
            trace!(index, status = sentence.status(), "skipping non-data sentence");
            continue;
        }
        store.try_push(T::from_sentence(sentence))?;
    }
    Ok(store)
}

/// Materializes `reply` into a new `Vec`.
pub fn materialize<'r, T>(reply: &'r Reply) -> RosResult<Vec<T>>
where
    T: FromSentence<'r>,
{
    materialize_into(reply, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Named<'r>(Option<&'r str>);

    impl<'r> FromSentence<'r> for Named<'r> {
        const KIND: &'static str = "named";

        fn from_sentence(sentence: &'r Sentence) -> Self {
            Named(sentence.param_val_by_key("name"))
        }
    }

    #[test]
    fn test_skips_non_data_without_stopping() {
        let reply = Reply::from_sentences(vec![
            Sentence::new("trap").with_param("name", "x"),
            Sentence::re().with_param("name", "a"),
            Sentence::new("empty"),
            Sentence::re(),
            Sentence::re().with_param("name", "c"),
            Sentence::done(),
        ]);

        let list: Vec<Named<'_>> = materialize(&reply).unwrap();
        assert_eq!(list.len(), reply.data_count());
        assert_eq!(list, vec![Named(Some("a")), Named(None), Named(Some("c"))]);
    }

    #[test]
    fn test_empty_reply() {
        let reply = Reply::new();
        let list: Vec<Named<'_>> = materialize(&reply).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_records_borrow_reply_storage() {
        let reply = Reply::from_sentences(vec![Sentence::re().with_param("name", "ether1")]);
        let list: Vec<Named<'_>> = materialize(&reply).unwrap();
        let stored = reply.first().unwrap().param_val_by_key("name").unwrap();
        assert!(std::ptr::eq(list[0].0.unwrap(), stored));
    }

    struct FullAfter<T> {
        limit: usize,
        inner: Vec<T>,
    }

    impl<T> RecordStore<T> for FullAfter<T> {
        fn try_push(&mut self, record: T) -> RosResult<()> {
            if self.inner.len() == self.limit {
                return Err(RosError::OutOfMemory);
            }
            self.inner.push(record);
            Ok(())
        }

        fn records(&self) -> &[T] {
            &self.inner
        }
    }

    #[test]
    fn test_store_failure_propagates() {
        let reply = Reply::from_sentences(vec![Sentence::re(), Sentence::re(), Sentence::re()]);
        let store = FullAfter::<Named<'_>> {
            limit: 1,
            inner: Vec::new(),
        };
        let result = materialize_into(&reply, store);
        assert!(matches!(result, Err(RosError::OutOfMemory)));
    }
}
