// crates/opensyde-halc/src/availability.rs

//! Parser and printer for availability expressions.
//!
//! The `availability` and `is-default-for` attributes restrict a use-case or
//! element to a set of channel indices:
//!
//! ```text
//! expr    := section (',' section)*
//! section := "all" | range | group
//! range   := digits ('-' digits)?
//! group   := '{' digits (',' digits)* '}'
//! ```
//!
//! A group `{a,b,c}` bundles channels: every member gets the other members as
//! dependent values.

use crate::types::Availability;
use std::fmt;

/// Errors of the availability expression parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// A section between two separators is empty (e.g. `1,,2`).
    EmptySection,
    /// Two `-` in one section (e.g. `1-2-3`).
    DoubleRange,
    /// A `-` without a number in front of it.
    MissingRangeStart,
    /// A `-` without a number after it.
    MissingRangeEnd,
    /// The range start is greater than its end.
    ReversedRange { start: u32, end: u32 },
    /// `{` inside a group.
    NestedGroup,
    /// `}` without a matching `{`.
    UnmatchedGroupEnd,
    /// `{` that is never closed.
    UnterminatedGroup,
    /// Ranges or keywords inside a group.
    InvalidGroupContent,
    /// A character that is not part of the language, or one in the wrong place.
    UnexpectedCharacter(char),
    /// A word other than `all`.
    UnknownKeyword(String),
    /// The index is not a valid channel.
    IndexOutOfRange { value: u64, channel_count: u32 },
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityError::EmptySection => write!(f, "empty section"),
            AvailabilityError::DoubleRange => write!(f, "more than one range marker in a section"),
            AvailabilityError::MissingRangeStart => write!(f, "range without start value"),
            AvailabilityError::MissingRangeEnd => write!(f, "range without end value"),
            AvailabilityError::ReversedRange { start, end } => {
                write!(f, "range start {} is greater than range end {}", start, end)
            }
            AvailabilityError::NestedGroup => write!(f, "nested group"),
            AvailabilityError::UnmatchedGroupEnd => write!(f, "group end without group start"),
            AvailabilityError::UnterminatedGroup => write!(f, "group is not closed"),
            AvailabilityError::InvalidGroupContent => {
                write!(f, "groups may only contain single values")
            }
            AvailabilityError::UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
            AvailabilityError::UnknownKeyword(word) => write!(f, "unknown keyword \"{}\"", word),
            AvailabilityError::IndexOutOfRange {
                value,
                channel_count,
            } => write!(
                f,
                "value {} is out of range (number of channels: {})",
                value, channel_count
            ),
        }
    }
}

impl std::error::Error for AvailabilityError {}

/// Scanner state for the section currently being read.
struct Scanner {
    channel_count: u32,
    entries: Vec<Availability>,
    number: Option<u64>,
    range_start: Option<u32>,
    word: String,
    in_group: bool,
    group: Vec<u32>,
    /// The section was a group that is closed already; only `,` may follow.
    group_closed: bool,
    /// Whitespace followed the current number or keyword.
    token_ended: bool,
}

impl Scanner {
    fn new(channel_count: u32) -> Self {
        Self {
            channel_count,
            entries: Vec::new(),
            number: None,
            range_start: None,
            word: String::new(),
            in_group: false,
            group: Vec::new(),
            group_closed: false,
            token_ended: false,
        }
    }

    fn check_index(&self, value: u64) -> Result<u32, AvailabilityError> {
        if value < u64::from(self.channel_count) {
            // Bounded by `channel_count`, so the conversion is lossless.
            Ok(value as u32)
        } else {
            Err(AvailabilityError::IndexOutOfRange {
                value,
                channel_count: self.channel_count,
            })
        }
    }

    fn feed(&mut self, c: char) -> Result<(), AvailabilityError> {
        if c.is_whitespace() {
            if self.number.is_some() || !self.word.is_empty() {
                self.token_ended = true;
            }
            return Ok(());
        }
        if self.group_closed && c != ',' {
            return Err(AvailabilityError::UnexpectedCharacter(c));
        }
        let token_ended = std::mem::take(&mut self.token_ended);
        match c {
            '0'..='9' => {
                if token_ended || !self.word.is_empty() {
                    return Err(AvailabilityError::UnexpectedCharacter(c));
                }
                let digit = u64::from(c as u8 - b'0');
                let current = self.number.unwrap_or(0);
                // Saturate so oversized numbers surface as out-of-range indices.
                self.number = Some(current.saturating_mul(10).saturating_add(digit));
            }
            'a'..='z' | 'A'..='Z' => {
                if self.in_group {
                    return Err(AvailabilityError::InvalidGroupContent);
                }
                if token_ended || self.number.is_some() || self.range_start.is_some() {
                    return Err(AvailabilityError::UnexpectedCharacter(c));
                }
                self.word.push(c);
            }
            '-' => {
                if self.in_group {
                    return Err(AvailabilityError::InvalidGroupContent);
                }
                if self.range_start.is_some() {
                    return Err(AvailabilityError::DoubleRange);
                }
                let start = self.number.take().ok_or(AvailabilityError::MissingRangeStart)?;
                self.range_start = Some(self.check_index(start)?);
            }
            '{' => {
                if self.in_group {
                    return Err(AvailabilityError::NestedGroup);
                }
                if self.number.is_some() || self.range_start.is_some() || !self.word.is_empty() {
                    return Err(AvailabilityError::UnexpectedCharacter(c));
                }
                self.in_group = true;
            }
            '}' => {
                if !self.in_group {
                    return Err(AvailabilityError::UnmatchedGroupEnd);
                }
                self.push_group_member()?;
                self.close_group();
            }
            ',' => {
                if self.in_group {
                    self.push_group_member()?;
                } else {
                    self.close_section()?;
                }
            }
            other => return Err(AvailabilityError::UnexpectedCharacter(other)),
        }
        Ok(())
    }

    fn push_group_member(&mut self) -> Result<(), AvailabilityError> {
        let value = self.number.take().ok_or(AvailabilityError::EmptySection)?;
        let index = self.check_index(value)?;
        self.group.push(index);
        Ok(())
    }

    /// Emits one entry per member, each listing all other members.
    fn close_group(&mut self) {
        let members = std::mem::take(&mut self.group);
        for (position, member) in members.iter().enumerate() {
            let mut dependent_values: Vec<u32> = members
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != position)
                .map(|(_, value)| *value)
                .collect();
            dependent_values.sort_unstable();
            self.entries.push(Availability {
                value_index: *member,
                dependent_values,
            });
        }
        self.in_group = false;
        self.group_closed = true;
    }

    fn close_section(&mut self) -> Result<(), AvailabilityError> {
        if self.group_closed {
            self.group_closed = false;
            return Ok(());
        }
        if !self.word.is_empty() {
            let word = std::mem::take(&mut self.word);
            if word != "all" {
                return Err(AvailabilityError::UnknownKeyword(word));
            }
            self.entries
                .extend((0..self.channel_count).map(Availability::single));
            return Ok(());
        }
        match (self.range_start.take(), self.number.take()) {
            (Some(start), Some(end)) => {
                let end = self.check_index(end)?;
                if start > end {
                    return Err(AvailabilityError::ReversedRange { start, end });
                }
                self.entries.extend((start..=end).map(Availability::single));
            }
            (Some(_), None) => return Err(AvailabilityError::MissingRangeEnd),
            (None, Some(value)) => {
                let index = self.check_index(value)?;
                self.entries.push(Availability::single(index));
            }
            (None, None) => return Err(AvailabilityError::EmptySection),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Availability>, AvailabilityError> {
        if self.in_group {
            return Err(AvailabilityError::UnterminatedGroup);
        }
        self.close_section()?;
        // Stable sort: duplicates keep their order for the duplicate check.
        self.entries.sort_by_key(|entry| entry.value_index);
        Ok(self.entries)
    }
}

/// Parses an availability expression for a domain with `channel_count` channels.
///
/// The result is ordered by channel index. An empty (or blank) expression
/// yields an empty list. Duplicate indices are not rejected here.
pub fn parse_availability(
    text: &str,
    channel_count: u32,
) -> Result<Vec<Availability>, AvailabilityError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut scanner = Scanner::new(channel_count);
    for c in text.chars() {
        scanner.feed(c)?;
    }
    scanner.finish()
}

/// Prints availability entries in the expression language.
///
/// With `only_save_once` a group is printed once, at its smallest member;
/// otherwise every grouped entry is printed with its own group. Ungrouped
/// consecutive indices are compressed to ranges and a complete ungrouped
/// channel set is printed as `all`.
pub fn format_availability(
    entries: &[Availability],
    channel_count: u32,
    only_save_once: bool,
) -> String {
    let complete = channel_count > 0
        && entries.len() == channel_count as usize
        && entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.value_index as usize == i && e.dependent_values.is_empty());
    if complete {
        return "all".to_string();
    }

    let mut sections: Vec<String> = Vec::new();
    let mut run: Option<(u32, u32)> = None;
    for entry in entries {
        if entry.dependent_values.is_empty() {
            run = match run {
                Some((start, end)) if end.checked_add(1) == Some(entry.value_index) => {
                    Some((start, entry.value_index))
                }
                Some(previous) => {
                    push_run(&mut sections, previous);
                    Some((entry.value_index, entry.value_index))
                }
                None => Some((entry.value_index, entry.value_index)),
            };
            continue;
        }
        if let Some(previous) = run.take() {
            push_run(&mut sections, previous);
        }
        if only_save_once
            && entry
                .dependent_values
                .iter()
                .any(|dependent| *dependent < entry.value_index)
        {
            continue;
        }
        let members: Vec<String> = std::iter::once(entry.value_index)
            .chain(entry.dependent_values.iter().copied())
            .map(|v| v.to_string())
            .collect();
        sections.push(format!("{{{}}}", members.join(",")));
    }
    if let Some(previous) = run {
        push_run(&mut sections, previous);
    }
    sections.join(",")
}

fn push_run(sections: &mut Vec<String>, (start, end): (u32, u32)) {
    match end - start {
        0 => sections.push(start.to_string()),
        1 => {
            sections.push(start.to_string());
            sections.push(end.to_string());
        }
        _ => sections.push(format!("{}-{}", start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(entries: &[Availability]) -> Vec<u32> {
        entries.iter().map(|e| e.value_index).collect()
    }

    #[test]
    fn test_all_expands_to_every_channel() {
        let result = parse_availability("all", 4).unwrap();
        assert_eq!(indices(&result), vec![0, 1, 2, 3]);
        assert!(result.iter().all(|e| e.dependent_values.is_empty()));
    }

    #[test]
    fn test_list_and_range() {
        assert_eq!(indices(&parse_availability("1,3", 4).unwrap()), vec![1, 3]);
        assert_eq!(indices(&parse_availability("0-2", 4).unwrap()), vec![0, 1, 2]);
        assert_eq!(
            indices(&parse_availability("3, 0 - 1", 4).unwrap()),
            vec![0, 1, 3]
        );
    }

    #[test]
    fn test_group_maps_every_member_to_the_others() {
        let result = parse_availability("{0,1,2}", 4).unwrap();
        assert_eq!(
            result,
            vec![
                Availability {
                    value_index: 0,
                    dependent_values: vec![1, 2]
                },
                Availability {
                    value_index: 1,
                    dependent_values: vec![0, 2]
                },
                Availability {
                    value_index: 2,
                    dependent_values: vec![0, 1]
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_index() {
        assert_eq!(
            parse_availability("4", 4),
            Err(AvailabilityError::IndexOutOfRange {
                value: 4,
                channel_count: 4
            })
        );
        assert!(matches!(
            parse_availability("{1,9}", 4),
            Err(AvailabilityError::IndexOutOfRange { value: 9, .. })
        ));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            parse_availability("1-2-3", 4),
            Err(AvailabilityError::DoubleRange)
        );
        assert_eq!(
            parse_availability("{1,2", 4),
            Err(AvailabilityError::UnterminatedGroup)
        );
        assert_eq!(
            parse_availability("1,2}", 4),
            Err(AvailabilityError::UnmatchedGroupEnd)
        );
        assert_eq!(
            parse_availability("{1,{2}}", 4),
            Err(AvailabilityError::NestedGroup)
        );
        assert_eq!(
            parse_availability("2-1", 4),
            Err(AvailabilityError::ReversedRange { start: 2, end: 1 })
        );
        assert_eq!(
            parse_availability("1,,2", 4),
            Err(AvailabilityError::EmptySection)
        );
        assert_eq!(
            parse_availability("1 2", 20),
            Err(AvailabilityError::UnexpectedCharacter('2'))
        );
        assert_eq!(
            parse_availability("a ll", 4),
            Err(AvailabilityError::UnexpectedCharacter('l'))
        );
        // Whitespace around separators is still fine.
        assert_eq!(parse_availability(" 1 , 3 ", 4).map(|a| a.len()), Ok(2));
        assert_eq!(
            parse_availability("{1,2}3", 4),
            Err(AvailabilityError::UnexpectedCharacter('3'))
        );
        assert_eq!(
            parse_availability("none", 4),
            Err(AvailabilityError::UnknownKeyword("none".to_string()))
        );
        assert_eq!(
            parse_availability("{0-1}", 4),
            Err(AvailabilityError::InvalidGroupContent)
        );
    }

    #[test]
    fn test_blank_expression_is_empty() {
        assert_eq!(parse_availability("  ", 4), Ok(Vec::new()));
        assert_eq!(parse_availability("all", 0), Ok(Vec::new()));
    }

    #[test]
    fn test_print_compresses_and_prints_groups_once() {
        let entries = parse_availability("{4,6},0-2,5", 8).unwrap();
        let printed = format_availability(&entries, 8, true);
        assert_eq!(printed, "0-2,{4,6},5");
        assert_eq!(parse_availability(&printed, 8).unwrap(), entries);
    }

    #[test]
    fn test_print_all_and_pairs() {
        let entries = parse_availability("0-3", 4).unwrap();
        assert_eq!(format_availability(&entries, 4, true), "all");

        let entries = parse_availability("1,2", 4).unwrap();
        assert_eq!(format_availability(&entries, 4, false), "1,2");
    }

    #[test]
    fn test_print_without_save_once_repeats_groups() {
        let entries = parse_availability("{0,1}", 2).unwrap();
        assert_eq!(format_availability(&entries, 2, false), "{0,1},{1,0}");
        assert_eq!(format_availability(&entries, 2, true), "{0,1}");
    }
}
