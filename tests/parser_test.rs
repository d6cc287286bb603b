use scamset::conversation::{parse_transcript, Role, Speaker};

fn alternating_transcript(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            if i % 2 == 0 {
                format!("VICTIM: victim line {}", i + 1)
            } else {
                format!("SCAMMER: scammer line {}", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn ten_alternating_lines_yield_ten_segments_in_order() {
    let segments = parse_transcript(&alternating_transcript(10));

    assert_eq!(segments.len(), 10);
    for (i, segment) in segments.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(segment.speaker, Speaker::Victim);
            assert_eq!(segment.role, Role::Victim);
        } else {
            assert_eq!(segment.speaker, Speaker::Scammer);
            assert_eq!(segment.role, Role::Scammer);
        }
        assert!(segment.text.ends_with(&format!("line {}", i + 1)));
    }
}

#[test]
fn segments_alternate_on_well_formed_input() {
    let segments = parse_transcript(&alternating_transcript(8));
    for pair in segments.windows(2) {
        assert_ne!(pair[0].speaker, pair[1].speaker);
    }
}

#[test]
fn leading_unlabeled_lines_are_discarded() {
    let raw = "Here is the conversation you asked for:\n\nVICTIM: Hello?\nSCAMMER: Good morning sir.";
    let segments = parse_transcript(raw);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "Hello?");
    assert_eq!(segments[1].text, "Good morning sir.");
}

#[test]
fn continuation_lines_join_the_open_turn() {
    let raw = "SCAMMER: Your account shows\nsuspicious activity today.\nVICTIM: Um... which account?";
    let segments = parse_transcript(raw);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "Your account shows suspicious activity today.");
    assert_eq!(segments[1].speaker, Speaker::Victim);
}

#[test]
fn last_open_turn_is_flushed() {
    let raw = "VICTIM: Hello?\nSCAMMER: This is the bank.\nIs Mr. Mehta available?";
    let segments = parse_transcript(raw);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].text, "This is the bank. Is Mr. Mehta available?");
}

#[test]
fn input_without_labels_yields_no_segments() {
    let segments = parse_transcript("I'm sorry, I cannot help with that request.");
    assert!(segments.is_empty());
}

#[test]
fn reparsing_serialized_turns_reconstructs_the_role_sequence() {
    let raw = "VICTIM: Hello, who is this?\nSCAMMER: Bank security, madam.\nVICTIM: Oh... okay.";
    let first = parse_transcript(raw);

    let rendered = first
        .iter()
        .map(|segment| format!("{}: {}", segment.speaker.label(), segment.text))
        .collect::<Vec<_>>()
        .join("\n");
    let second = parse_transcript(&rendered);

    assert_eq!(first, second);
}
