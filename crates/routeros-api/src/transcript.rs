//! Line-oriented text form of recorded API replies.
//!
//! A transcript scripts reply batches per command:
//!
//! ```text
//! # comment
//! /interface/print
//! !re
//! =name=ether1
//! =packets=100/200
//! !done
//! ```
//!
//! A `/command` line starts a command section, `!status` starts a sentence,
//! and `=key=value` adds an attribute to the current sentence (the value may
//! itself contain `=`). A `!done` or `!fatal` sentence closes the current
//! reply batch. Blank lines and `#` comments are ignored.

use crate::error::{RosError, RosResult};
use crate::reply::{Reply, Sentence};

/// Scripted reply batches for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandScript {
    pub command: String,
    pub batches: Vec<Reply>,
}

#[derive(Default)]
struct Parser {
    scripts: Vec<CommandScript>,
    section: Option<CommandScript>,
    batch: Reply,
    sentence: Option<Sentence>,
}

impl Parser {
    fn finish_sentence(&mut self) {
        if let Some(sentence) = self.sentence.take() {
            let terminal = sentence.kind().is_terminal();
            self.batch.push(sentence);
            if terminal {
                if let Some(section) = self.section.as_mut() {
                    section.batches.push(std::mem::take(&mut self.batch));
                }
            }
        }
    }

    fn finish_section(&mut self, line: usize) -> RosResult<()> {
        self.finish_sentence();
        if !self.batch.is_empty() {
            return Err(RosError::transcript(
                line,
                "reply batch not terminated by !done",
            ));
        }
        if let Some(section) = self.section.take() {
            self.scripts.push(section);
        }
        Ok(())
    }

    fn word(&mut self, line: usize, word: &str) -> RosResult<()> {
        if word.starts_with('/') {
            self.finish_section(line)?;
            self.section = Some(CommandScript {
                command: word.trim_end().to_string(),
                batches: Vec::new(),
            });
        } else if let Some(status) = word.strip_prefix('!') {
            let status = status.trim_end();
            if status.is_empty() {
                return Err(RosError::transcript(line, "empty sentence status"));
            }
            if self.section.is_none() {
                return Err(RosError::transcript(line, "sentence before any command"));
            }
            self.finish_sentence();
            self.sentence = Some(Sentence::new(status));
        } else if let Some(attribute) = word.strip_prefix('=') {
            let sentence = self
                .sentence
                .as_mut()
                .ok_or_else(|| RosError::transcript(line, "attribute outside a sentence"))?;
            let (key, value) = attribute
                .split_once('=')
                .ok_or_else(|| RosError::transcript(line, "attribute without '='"))?;
            if key.is_empty() {
                return Err(RosError::transcript(line, "attribute with empty key"));
            }
            sentence.push_param(key, value);
        } else {
            return Err(RosError::transcript(
                line,
                format!("unrecognized word '{}'", word),
            ));
        }
        Ok(())
    }
}

/// Parses a transcript into per-command scripts, in file order.
pub fn parse(text: &str) -> RosResult<Vec<CommandScript>> {
    let mut parser = Parser::default();
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        last_line = idx + 1;
        let word = raw.trim_start();
        if word.trim_end().is_empty() || word.starts_with('#') {
            continue;
        }
        parser.word(last_line, word)?;
    }

    parser.finish_section(last_line)?;
    Ok(parser.scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
# two interfaces, one batch
/interface/print
!re
=name=ether1
=comment=uplink=isp
=packets=100/200
!re
=name=ether2
!done

/system/resource/print
!trap
=message=no such command
!done
";

    #[test]
    fn test_parse_sections_and_batches() {
        let scripts = parse(SAMPLE).unwrap();
        assert_eq!(scripts.len(), 2);

        let iface = &scripts[0];
        assert_eq!(iface.command, "/interface/print");
        assert_eq!(iface.batches.len(), 1);
        let batch = &iface.batches[0];
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.data_count(), 2);
        let first = batch.first().unwrap();
        assert_eq!(first.param_val_by_key("comment"), Some("uplink=isp"));
        assert_eq!(first.param_val_by_key("packets"), Some("100/200"));

        let trap = &scripts[1].batches[0];
        assert_eq!(trap.first().unwrap().status(), "trap");
        assert_eq!(trap.data_count(), 0);
    }

    #[test]
    fn test_multiple_batches_per_command() {
        let text = "/interface/print\n!re\n=name=a\n!done\n!re\n=name=b\n!done\n";
        let scripts = parse(text).unwrap();
        assert_eq!(scripts[0].batches.len(), 2);
    }

    #[test]
    fn test_empty_value_allowed() {
        let text = "/interface/print\n!re\n=comment=\n!done\n";
        let scripts = parse(text).unwrap();
        let s = scripts[0].batches[0].first().unwrap();
        assert_eq!(s.param_val_by_key("comment"), Some(""));
    }

    #[test]
    fn test_section_without_batches() {
        let scripts = parse("/interface/print\n").unwrap();
        assert_eq!(scripts[0].batches, Vec::<Reply>::new());
    }

    #[test]
    fn test_unterminated_batch() {
        let err = parse("/interface/print\n!re\n=name=a\n").unwrap_err();
        assert!(matches!(err, RosError::Transcript { line: 3, .. }));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            parse("!re\n").unwrap_err(),
            RosError::Transcript { line: 1, .. }
        ));
        assert!(matches!(
            parse("/interface/print\n=name=a\n").unwrap_err(),
            RosError::Transcript { line: 2, .. }
        ));
        assert!(matches!(
            parse("/interface/print\n!re\n=name\n").unwrap_err(),
            RosError::Transcript { line: 3, .. }
        ));
        assert!(matches!(
            parse("/interface/print\n!re\nname=a\n").unwrap_err(),
            RosError::Transcript { line: 3, .. }
        ));
        assert!(matches!(
            parse("/interface/print\n!\n").unwrap_err(),
            RosError::Transcript { line: 2, .. }
        ));
    }
}
