use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Line label as it appears in generator output (`VICTIM:` / `SCAMMER:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    Victim,
    Scammer,
}

impl Speaker {
    pub fn role(self) -> Role {
        match self {
            Speaker::Victim => Role::Victim,
            Speaker::Scammer => Role::Scammer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speaker::Victim => "VICTIM",
            Speaker::Scammer => "SCAMMER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Victim,
    Scammer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Victim => "victim",
            Role::Scammer => "scammer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamType {
    BankFraud,
    TechSupport,
    LotteryWinner,
    RelativeEmergency,
    GovernmentOfficial,
    JobOffer,
}

impl ScamType {
    pub const ALL: [ScamType; 6] = [
        ScamType::BankFraud,
        ScamType::TechSupport,
        ScamType::LotteryWinner,
        ScamType::RelativeEmergency,
        ScamType::GovernmentOfficial,
        ScamType::JobOffer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScamType::BankFraud => "bank_fraud",
            ScamType::TechSupport => "tech_support",
            ScamType::LotteryWinner => "lottery_winner",
            ScamType::RelativeEmergency => "relative_emergency",
            ScamType::GovernmentOfficial => "government_official",
            ScamType::JobOffer => "job_offer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    Hinglish,
    English,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Hindi, Language::Hinglish, Language::English];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Hindi => "hindi",
            Language::Hinglish => "hinglish",
            Language::English => "english",
        }
    }
}

/// One uninterrupted spoken turn by a single role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub speaker: Speaker,
    pub role: Role,
    pub text: String,
}

/// A full generated conversation, written once by the generator and treated
/// as immutable input by the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub file_id: String,
    pub scam_type: ScamType,
    pub language: Language,
    pub segments: Vec<Segment>,
    pub num_speakers: u32,
    pub speaker_roles: Vec<Role>,
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    pub fn new(
        file_id: impl Into<String>,
        scam_type: ScamType,
        language: Language,
        segments: Vec<Segment>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            scam_type,
            language,
            segments,
            num_speakers: 2,
            speaker_roles: vec![Role::Victim, Role::Scammer],
            timestamp: Utc::now(),
        }
    }
}

/// Parse raw generator output into ordered segments.
///
/// A line opens a turn iff it starts with the exact `VICTIM:` or `SCAMMER:`
/// prefix. Subsequent non-empty lines join the open turn with spaces until
/// the next labeled line. Lines before the first label are discarded, and
/// the last open turn is flushed unconditionally at end of input.
pub fn parse_transcript(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<(Speaker, Vec<String>)> = None;

    for line in raw.trim().lines() {
        let line = line.trim();

        let labeled = if let Some(rest) = line.strip_prefix("VICTIM:") {
            Some((Speaker::Victim, rest))
        } else if let Some(rest) = line.strip_prefix("SCAMMER:") {
            Some((Speaker::Scammer, rest))
        } else {
            None
        };

        match labeled {
            Some((speaker, rest)) => {
                flush(&mut segments, current.take());
                current = Some((speaker, vec![rest.trim().to_string()]));
            }
            None => {
                if line.is_empty() {
                    continue;
                }
                if let Some((_, parts)) = current.as_mut() {
                    parts.push(line.to_string());
                }
            }
        }
    }

    flush(&mut segments, current.take());
    segments
}

fn flush(segments: &mut Vec<Segment>, current: Option<(Speaker, Vec<String>)>) {
    if let Some((speaker, parts)) = current {
        let text = parts.join(" ").trim().to_string();
        if text.is_empty() {
            return;
        }
        segments.push(Segment {
            speaker,
            role: speaker.role(),
            text,
        });
    }
}
