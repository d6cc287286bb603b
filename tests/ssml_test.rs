use scamset::tts::{ssml, Prosody};

fn prosody() -> Prosody {
    Prosody {
        rate: "+10%".to_string(),
        volume: "+0%".to_string(),
        pitch: "-5Hz".to_string(),
    }
}

#[test]
fn wraps_text_in_prosody_when_modifiers_are_given() {
    let doc = ssml::build("Hello there", "en-US-AriaNeural", Some(&prosody()));

    assert!(doc.contains("<voice name='en-US-AriaNeural'>"));
    assert!(doc.contains("<prosody rate='+10%' volume='+0%' pitch='-5Hz'>"));
    assert!(doc.contains("Hello there"));
    assert!(doc.contains("xml:lang='en-US'"));
}

#[test]
fn fallback_request_omits_the_prosody_element() {
    let doc = ssml::build("Hello there", "hi-IN-SwaraNeural", None);

    assert!(!doc.contains("<prosody"));
    assert!(doc.contains("<voice name='hi-IN-SwaraNeural'>Hello there</voice>"));
    assert!(doc.contains("xml:lang='hi-IN'"));
}

#[test]
fn markup_characters_are_escaped() {
    let doc = ssml::build("Press <1> & say \"yes\"", "en-GB-RyanNeural", None);

    assert!(doc.contains("Press &lt;1&gt; &amp; say &quot;yes&quot;"));
    assert!(!doc.contains("<1>"));
}
