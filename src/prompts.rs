//! Scenario/language prompt templates for the conversation generator.
//!
//! Domain text, not engineering: each body instructs the model to emit
//! spoken dialogue only, labeled strictly `VICTIM:` / `SCAMMER:`, with
//! alternating turns and a natural ending. Pairs without a dedicated body
//! fall back to the bank-fraud english body.

use crate::conversation::{Language, ScamType};

const BANK_FRAUD_ENGLISH: &str = r#"Generate a realistic and natural phone conversation between a bank fraud scammer and a victim.
The scammer pretends to be from the victim's bank security department, claiming there is suspicious activity on their account.

SCAMMER: (professional, persuasive, urgent; may ask for OTP/account details)
VICTIM: (initially cautious; may become convinced or remain skeptical)

Requirements:
- Use only spoken dialogue lines. Do NOT include stage directions, sound descriptions, or action descriptions inside the dialogue (for example: do not use *rustling sounds*, (reading out the card number slowly), [sigh], or any bracketed/asterisked actions).
- Short natural hesitations like "um", "uh", "...", and short pauses written as ellipses are allowed inside spoken lines.
- Speaker labels must always be the labels VICTIM and SCAMMER (do NOT label speakers by any provided name).
- If either person introduces their own name in speech (e.g., "This is Rahul from the bank" or "I'm Mr. Mehta"), then those names may be used naturally inside later spoken lines (e.g., "Mr. Mehta, could you confirm..."). Do NOT replace the line label with those names - lines must still start with VICTIM: or SCAMMER:.
- Alternate speakers line-by-line. Include at least 8-10 exchanges.
- End the conversation naturally (victim realizes it's a scam, refuses, gives info, hangs up upset, etc.). Do not end abruptly or with instructions."#;

const BANK_FRAUD_HINDI: &str = r#"बैंक धोखाधड़ी स्कैमर और पीड़ित के बीच एक वास्तविक फोन वार्तालाप उत्पन्न करें।
स्कैमर बैंक सुरक्षा विभाग होने का दावा करता है और कहता है कि खाते में संदिग्ध गतिविधि है।

नियम:
- केवल बोली हुई संवाद पंक्तियाँ लिखें। संवाद में स्टेज डायरेक्शन, आवाज़ के वर्णन या क्रियाओं का वर्णन न डालें (उदाहरण: *rustling sounds*, (reading out the card number slowly), [sigh] इत्यादि न लिखें)।
- "um", "uh", "..." जैसी संक्षिप्त हिचकियाँ या विराम स्वीकार्य हैं।
- स्पीकर लेबल हमेशा VICTIM और SCAMMER रहें; नामों से लाइन लेबल मत बदलें।
- यदि कोई स्पीकर अपने नाम का परिचय देता है, तो वह नाम बाद की बोली में प्राकृतिक रूप से उपयोग किया जा सकता है पर लाइन की शुरुआत VICTIM: या SCAMMER: ही होनी चाहिए।
- स्पीकर्स बारी-बारी बोलें, कम से कम 8-10 विनिमय शामिल करें।
- बातचीत का अंत स्वाभाविक रूप से करें।"#;

const BANK_FRAUD_HINGLISH: &str = r#"Generate a realistic Hinglish phone conversation between a bank fraud scammer and a victim.

Rules:
- Include only spoken dialogue lines. Do NOT include stage directions or sound/action descriptions like *rustling sounds* or (reading out the card number slowly).
- Short spoken hesitations ("um", "uh", "...") are allowed.
- Always label lines with VICTIM: and SCAMMER: only.
- If a name is spoken by a character, that name can be used naturally later inside speech, but do NOT replace the line label with that name.
- Alternate speakers line-by-line and produce at least 8-10 exchanges.
- End naturally (victim refuses, realises, or call ends emotionally)."#;

const TECH_SUPPORT_ENGLISH: &str = r#"Generate a tech support scam conversation where the scammer claims the victim's computer has a virus.

Rules:
- Only spoken dialogue lines. Forbid stage directions, sound cues, or action descriptions in parentheses or asterisks.
- Short hesitations allowed ("um", "uh", "...").
- Labels must remain VICTIM: and SCAMMER:.
- If names are spoken, reuse them inside dialogue (do not use them as labels).
- Alternate lines and end naturally (refusal, agreement, or hang up)."#;

const FORMAT_FOOTER: &str = r#"FORMAT (follow exactly):
VICTIM: [spoken dialogue - no stage directions or sound descriptions]
SCAMMER: [spoken dialogue - no stage directions or sound descriptions]
VICTIM: ...
SCAMMER: ...

Ensure strict alternation, natural flow, allowed brief hesitations (um, uh, ...), and a natural, complete ending."#;

pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Hindi => "Generate conversation in Hindi only",
        Language::Hinglish => "Generate conversation in Hinglish (Hindi-English mix)",
        Language::English => "Generate conversation in English only",
    }
}

fn scenario_body(scam_type: ScamType, language: Language) -> &'static str {
    match (scam_type, language) {
        (ScamType::BankFraud, Language::English) => BANK_FRAUD_ENGLISH,
        (ScamType::BankFraud, Language::Hindi) => BANK_FRAUD_HINDI,
        (ScamType::BankFraud, Language::Hinglish) => BANK_FRAUD_HINGLISH,
        (ScamType::TechSupport, Language::English) => TECH_SUPPORT_ENGLISH,
        _ => BANK_FRAUD_ENGLISH,
    }
}

pub fn build_prompt(scam_type: ScamType, language: Language) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        language_instruction(language),
        scenario_body(scam_type, language),
        FORMAT_FOOTER
    )
}
