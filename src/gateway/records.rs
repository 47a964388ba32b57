//! Typed records parsed from gateway output.
//!
//! Scripts report what they did as tagged lines (`GROUP:a|b|c|d`,
//! `SUCCESS:...`). The parser turns well-formed lines into [`Record`]s,
//! collects a warning for tagged lines with the wrong shape, and leaves
//! everything else untouched in the raw transcript.

/// One tagged line of script output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Session {
        tenant_id: String,
        account: String,
    },
    Group {
        name: String,
        id: String,
        mail_nickname: String,
        description: String,
    },
    ResourceAccount {
        name: String,
        upn: String,
        id: String,
        usage_location: String,
    },
    CallQueue {
        name: String,
        id: String,
        language_id: String,
    },
    AutoAttendant {
        name: String,
        id: String,
        language_id: String,
        time_zone_id: String,
    },
    /// Batch position marker, `PROGRESS:<index>/<total>|<group-name>`.
    Progress {
        index: u32,
        total: u32,
        group_name: String,
    },
    Success(String),
    Error(String),
}

/// Parsed result of one dispatch.
#[derive(Debug, Clone, Default)]
pub struct GatewayOutput {
    /// Full stdout transcript, including untagged lines.
    pub raw: String,
    /// Tagged lines in transcript order.
    pub records: Vec<Record>,
    /// Tagged lines that did not match their record shape.
    pub warnings: Vec<String>,
}

impl GatewayOutput {
    pub fn parse(raw: String) -> Self {
        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_record_line(line) {
                ParsedLine::Record(record) => records.push(record),
                ParsedLine::Malformed(problem) => {
                    warnings.push(format!("line {}: {}", idx + 1, problem));
                }
                ParsedLine::Untagged => {}
            }
        }

        GatewayOutput {
            raw,
            records,
            warnings,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.first_error().is_some()
    }

    /// Payload of the first `ERROR:` record, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.records.iter().find_map(|record| match record {
            Record::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|record| match record {
                Record::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|record| match record {
                Record::Success(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tenant id and account of the session probe, if one ran.
    pub fn session_record(&self) -> Option<(&str, &str)> {
        self.records.iter().find_map(|record| match record {
            Record::Session { tenant_id, account } => {
                Some((tenant_id.as_str(), account.as_str()))
            }
            _ => None,
        })
    }
}

enum ParsedLine {
    Record(Record),
    Malformed(String),
    Untagged,
}

fn parse_record_line(line: &str) -> ParsedLine {
    if let Some(rest) = line.strip_prefix("SESSION:") {
        return match exact_fields(rest, 2) {
            Ok(f) => ParsedLine::Record(Record::Session {
                tenant_id: f[0].to_string(),
                account: f[1].to_string(),
            }),
            Err(found) => malformed("SESSION", 2, found),
        };
    }
    if let Some(rest) = line.strip_prefix("GROUP:") {
        // The description is free text and may itself contain pipes; it is
        // the last field, so any surplus folds into it.
        let f: Vec<&str> = rest.splitn(4, '|').collect();
        return if f.len() == 4 {
            ParsedLine::Record(Record::Group {
                name: f[0].to_string(),
                id: f[1].to_string(),
                mail_nickname: f[2].to_string(),
                description: f[3].to_string(),
            })
        } else {
            malformed("GROUP", 4, f.len())
        };
    }
    if let Some(rest) = line.strip_prefix("RESOURCEACCOUNT:") {
        return match exact_fields(rest, 4) {
            Ok(f) => ParsedLine::Record(Record::ResourceAccount {
                name: f[0].to_string(),
                upn: f[1].to_string(),
                id: f[2].to_string(),
                usage_location: f[3].to_string(),
            }),
            Err(found) => malformed("RESOURCEACCOUNT", 4, found),
        };
    }
    if let Some(rest) = line.strip_prefix("CALLQUEUE:") {
        return match exact_fields(rest, 3) {
            Ok(f) => ParsedLine::Record(Record::CallQueue {
                name: f[0].to_string(),
                id: f[1].to_string(),
                language_id: f[2].to_string(),
            }),
            Err(found) => malformed("CALLQUEUE", 3, found),
        };
    }
    if let Some(rest) = line.strip_prefix("AUTOATTENDANT:") {
        return match exact_fields(rest, 4) {
            Ok(f) => ParsedLine::Record(Record::AutoAttendant {
                name: f[0].to_string(),
                id: f[1].to_string(),
                language_id: f[2].to_string(),
                time_zone_id: f[3].to_string(),
            }),
            Err(found) => malformed("AUTOATTENDANT", 4, found),
        };
    }
    if let Some(rest) = line.strip_prefix("PROGRESS:") {
        return parse_progress(rest);
    }
    if let Some(rest) = line.strip_prefix("SUCCESS:") {
        return ParsedLine::Record(Record::Success(rest.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix("ERROR:") {
        return ParsedLine::Record(Record::Error(rest.trim().to_string()));
    }
    ParsedLine::Untagged
}

fn parse_progress(rest: &str) -> ParsedLine {
    let bad = || {
        ParsedLine::Malformed(format!(
            "PROGRESS record '{}' is not of the form index/total|name",
            rest
        ))
    };

    let Some((position, group_name)) = rest.split_once('|') else {
        return bad();
    };
    let Some((index, total)) = position.split_once('/') else {
        return bad();
    };
    match (index.trim().parse::<u32>(), total.trim().parse::<u32>()) {
        (Ok(index), Ok(total)) => ParsedLine::Record(Record::Progress {
            index,
            total,
            group_name: group_name.to_string(),
        }),
        _ => bad(),
    }
}

fn exact_fields(rest: &str, expected: usize) -> Result<Vec<&str>, usize> {
    let fields: Vec<&str> = rest.split('|').collect();
    if fields.len() == expected {
        Ok(fields)
    } else {
        Err(fields.len())
    }
}

fn malformed(tag: &str, expected: usize, found: usize) -> ParsedLine {
    ParsedLine::Malformed(format!(
        "{} record has {} fields, expected {}",
        tag, found, expected
    ))
}
