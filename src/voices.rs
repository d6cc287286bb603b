use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::conversation::{Language, Role};
use crate::tts::Prosody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no voice catalog for language {0}")]
    UnknownLanguage(&'static str),
    #[error("empty voice pool {pool} for language {language}")]
    EmptyPool {
        language: &'static str,
        pool: String,
    },
    #[error("no scammer voice distinct from {victim_voice} for language {language}")]
    NoDistinctVoice {
        language: &'static str,
        victim_voice: String,
    },
}

/// Synthetic voice identifiers keyed by role and gender for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicePools {
    pub victim_male: Vec<String>,
    pub victim_female: Vec<String>,
    pub scammer_male: Vec<String>,
    pub scammer_female: Vec<String>,
}

impl VoicePools {
    fn pool(&self, role: Role, gender: Gender) -> &[String] {
        match (role, gender) {
            (Role::Victim, Gender::Male) => &self.victim_male,
            (Role::Victim, Gender::Female) => &self.victim_female,
            (Role::Scammer, Gender::Male) => &self.scammer_male,
            (Role::Scammer, Gender::Female) => &self.scammer_female,
        }
    }

    pub fn all_voices(&self) -> impl Iterator<Item = &String> {
        self.victim_male
            .iter()
            .chain(&self.victim_female)
            .chain(&self.scammer_male)
            .chain(&self.scammer_female)
    }
}

/// Language-keyed table of role/gender voice pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceCatalog {
    pub languages: HashMap<Language, VoicePools>,
}

/// A distinct voice pair for one conversation.
#[derive(Debug, Clone)]
pub struct VoiceAssignment {
    pub victim_voice: String,
    pub scammer_voice: String,
    pub victim_gender: Gender,
    pub scammer_gender: Gender,
}

impl VoiceAssignment {
    pub fn voice_for(&self, role: Role) -> &str {
        match role {
            Role::Victim => &self.victim_voice,
            Role::Scammer => &self.scammer_voice,
        }
    }

    pub fn gender_for(&self, role: Role) -> Gender {
        match role {
            Role::Victim => self.victim_gender,
            Role::Scammer => self.scammer_gender,
        }
    }
}

impl VoiceCatalog {
    pub fn pools(&self, language: Language) -> Result<&VoicePools, CatalogError> {
        self.languages
            .get(&language)
            .ok_or(CatalogError::UnknownLanguage(language.as_str()))
    }

    /// Draw genders independently at random, then one voice per role,
    /// redrawing the scammer voice when the identifiers collide.
    pub fn assign(
        &self,
        language: Language,
        rng: &mut impl Rng,
    ) -> Result<VoiceAssignment, CatalogError> {
        let victim_gender = *[Gender::Male, Gender::Female]
            .choose(rng)
            .unwrap_or(&Gender::Male);
        let scammer_gender = *[Gender::Male, Gender::Female]
            .choose(rng)
            .unwrap_or(&Gender::Female);
        self.assign_with_genders(language, victim_gender, scammer_gender, rng)
    }

    pub fn assign_with_genders(
        &self,
        language: Language,
        victim_gender: Gender,
        scammer_gender: Gender,
        rng: &mut impl Rng,
    ) -> Result<VoiceAssignment, CatalogError> {
        let pools = self.pools(language)?;

        let victim_voice = choose_voice(pools, language, Role::Victim, victim_gender, rng)?;
        let mut scammer_voice = choose_voice(pools, language, Role::Scammer, scammer_gender, rng)?;

        // The pools may overlap across roles; the pair must stay distinct.
        if scammer_voice == victim_voice {
            let distinct: Vec<&String> = pools
                .pool(Role::Scammer, scammer_gender)
                .iter()
                .filter(|voice| **voice != victim_voice)
                .collect();
            scammer_voice = distinct
                .choose(rng)
                .map(|voice| (*voice).clone())
                .ok_or_else(|| CatalogError::NoDistinctVoice {
                    language: language.as_str(),
                    victim_voice: victim_voice.clone(),
                })?;
        }

        Ok(VoiceAssignment {
            victim_voice,
            scammer_voice,
            victim_gender,
            scammer_gender,
        })
    }

    /// Reject catalogs that could fail assignment at runtime: every pool
    /// populated, and every victim voice leaves at least one distinct
    /// scammer alternative for both scammer genders.
    pub fn validate(&self) -> anyhow::Result<()> {
        for language in Language::ALL {
            let pools = self.pools(language)?;
            for (name, pool) in [
                ("victim_male", &pools.victim_male),
                ("victim_female", &pools.victim_female),
                ("scammer_male", &pools.scammer_male),
                ("scammer_female", &pools.scammer_female),
            ] {
                if pool.is_empty() {
                    anyhow::bail!("empty voice pool {name} for language {}", language.as_str());
                }
            }

            for victim_gender in [Gender::Male, Gender::Female] {
                for scammer_gender in [Gender::Male, Gender::Female] {
                    let scammer_pool = pools.pool(Role::Scammer, scammer_gender);
                    for victim_voice in pools.pool(Role::Victim, victim_gender) {
                        if !scammer_pool.iter().any(|voice| voice != victim_voice) {
                            anyhow::bail!(
                                "catalog for {} cannot produce a scammer voice distinct from {victim_voice}",
                                language.as_str()
                            );
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        let mut languages = HashMap::new();

        languages.insert(
            Language::Hindi,
            VoicePools {
                victim_male: strings(&["hi-IN-MadhurNeural"]),
                victim_female: strings(&["hi-IN-SwaraNeural"]),
                scammer_male: strings(&["hi-IN-MadhurNeural", "hi-IN-AaravNeural"]),
                scammer_female: strings(&["hi-IN-SwaraNeural", "hi-IN-AnanyaNeural"]),
            },
        );

        languages.insert(
            Language::Hinglish,
            VoicePools {
                victim_male: strings(&["en-IN-PrabhatNeural", "en-IN-SameerNeural"]),
                victim_female: strings(&["en-IN-NeerjaNeural", "en-IN-ShrutiNeural"]),
                scammer_male: strings(&["hi-IN-MadhurNeural", "en-GB-RyanNeural"]),
                scammer_female: strings(&["hi-IN-SwaraNeural", "en-GB-SoniaNeural"]),
            },
        );

        languages.insert(
            Language::English,
            VoicePools {
                victim_male: strings(&["en-US-AndrewNeural", "en-GB-RyanNeural"]),
                victim_female: strings(&["en-US-AriaNeural", "en-GB-SoniaNeural"]),
                scammer_male: strings(&["en-US-BrianNeural", "en-GB-ThomasNeural"]),
                scammer_female: strings(&["en-US-JennyNeural", "en-GB-HollieNeural"]),
            },
        );

        Self { languages }
    }
}

fn choose_voice(
    pools: &VoicePools,
    language: Language,
    role: Role,
    gender: Gender,
    rng: &mut impl Rng,
) -> Result<String, CatalogError> {
    pools
        .pool(role, gender)
        .choose(rng)
        .cloned()
        .ok_or_else(|| CatalogError::EmptyPool {
            language: language.as_str(),
            pool: format!("{}_{}", role.as_str(), gender.as_str()),
        })
}

/// Per-role rate/volume pools plus the gender-conditioned pitch pools used
/// for inter-segment acoustic variation. The base voice never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProsodyCatalog {
    pub victim: RoleProsody,
    pub scammer: RoleProsody,
    pub pitch_male: Vec<String>,
    pub pitch_female: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProsody {
    pub rate: Vec<String>,
    pub volume: Vec<String>,
}

impl ProsodyCatalog {
    pub fn sample(&self, role: Role, gender: Gender, rng: &mut impl Rng) -> Prosody {
        let base = match role {
            Role::Victim => &self.victim,
            Role::Scammer => &self.scammer,
        };
        let pitch_pool = match gender {
            Gender::Male => &self.pitch_male,
            Gender::Female => &self.pitch_female,
        };

        Prosody {
            rate: choose_or(&base.rate, "+0%", rng),
            volume: choose_or(&base.volume, "+0%", rng),
            pitch: choose_or(pitch_pool, "+0Hz", rng),
        }
    }
}

impl Default for ProsodyCatalog {
    fn default() -> Self {
        Self {
            victim: RoleProsody {
                rate: strings(&["-10%", "+0%", "+5%"]),
                volume: strings(&["+0%", "+2%"]),
            },
            scammer: RoleProsody {
                rate: strings(&["+0%", "+10%", "+15%"]),
                volume: strings(&["+0%", "+5%", "+8%"]),
            },
            pitch_male: strings(&["-10Hz", "-5Hz", "+0Hz", "+5Hz"]),
            pitch_female: strings(&["+0Hz", "+5Hz", "+10Hz", "+15Hz"]),
        }
    }
}

fn choose_or(pool: &[String], fallback: &str, rng: &mut impl Rng) -> String {
    pool.choose(rng)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
