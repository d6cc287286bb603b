//! SSML document construction for the speech service.

use super::Prosody;

/// Build the SSML body for one segment. When `prosody` is `None` the text is
/// wrapped in the voice element alone, which is the fallback request shape.
pub fn build(text: &str, voice: &str, prosody: Option<&Prosody>) -> String {
    let lang = voice_lang(voice);
    let escaped = escape(text);

    let inner = match prosody {
        Some(prosody) => format!(
            "<prosody rate='{}' volume='{}' pitch='{}'>{}</prosody>",
            escape(&prosody.rate),
            escape(&prosody.volume),
            escape(&prosody.pitch),
            escaped
        ),
        None => escaped,
    };

    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{lang}'>\
<voice name='{}'>{inner}</voice></speak>",
        escape(voice)
    )
}

/// Voice identifiers are locale-prefixed (`hi-IN-MadhurNeural`); reuse the
/// prefix as the document language, defaulting to en-US.
fn voice_lang(voice: &str) -> String {
    let mut parts = voice.splitn(3, '-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region)) if lang.len() == 2 && region.len() == 2 => {
            format!("{lang}-{region}")
        }
        _ => "en-US".to_string(),
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
