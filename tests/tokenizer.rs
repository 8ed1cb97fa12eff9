//! Tokenizer properties over whole tunes

use abcedit::syntax::{Highlighter, Token};
use abcedit::{AbcLexer, Document, ScannerState, TokenTag};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TUNE: &str = "X:1
T:The Kesh
R:jig
M:6/8
L:1/8
K:G
|:GAG GAB|ABA ABd|edd gdd|edB dBA|
% second part
\"G\"GAG GAB|\"D\"ABA ABd|^c2 _B,, =f'/2 z3|(de) d-d2:|
";

/// Pieces random texts are built from: ABC symbols, whitespace and multibyte chars
const PIECES: &[&str] = &[
    "A", "g", "c'", "B,", "K", ":", "K:", "T:", "X:", "|", "[", "]", "^", "=", "_", "/", "2", "z", "x",
    "Z", "\"", "(", ")", "-", "%", "y", " ", "\t", "\n", "é", "♯", "你", "😀",
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..40);
    (0..len).map(|_| PIECES[rng.gen_range(0..PIECES.len())]).collect()
}

fn token_text<'a>(doc: &'a Document, token: &Token) -> &'a str {
    doc.slice(token.start, token.end).unwrap()
}

#[test]
fn steps_reconstruct_text() {
    let lexer = AbcLexer::new();
    let rebuilt: String = lexer.steps(TUNE).map(|s| &TUNE[s.start..s.end]).collect();
    assert_eq!(rebuilt, TUNE);
}

#[test]
fn tokens_are_ordered_and_disjoint() {
    let lexer = AbcLexer::new();
    let tokens: Vec<_> = lexer.tokens(TUNE).collect();
    for pair in tokens.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    assert!(tokens.iter().all(|t| t.end > t.start));
}

#[test]
fn header_region_ends_at_key() {
    let lexer = AbcLexer::new();
    let doc = Document::new(TUNE);
    let headers: Vec<_> = lexer
        .tokens(TUNE)
        .filter(|t| t.tag == TokenTag::Header)
        .map(|t| token_text(&doc, &t))
        .collect();
    assert_eq!(headers, vec!["X:", "T:", "R:", "M:", "L:", "K:"]);
}

#[test]
fn body_classes_present() {
    let lexer = AbcLexer::new();
    let tags: Vec<_> = lexer.tokens(TUNE).map(|t| t.tag).collect();
    for tag in [
        TokenTag::Note,
        TokenTag::Accidental,
        TokenTag::Duration,
        TokenTag::Rest,
        TokenTag::Chord,
        TokenTag::Slur,
        TokenTag::Bar,
        TokenTag::Comment,
    ] {
        assert!(tags.contains(&tag), "missing {:?}", tag);
    }
}

#[test]
fn line_highlighting_matches_whole_text() {
    let lexer = AbcLexer::new();
    let doc = Document::new(TUNE);
    let whole: Vec<_> = lexer.tokens(TUNE).map(|t| (t.tag, token_text(&doc, &t))).collect();

    let lines: Vec<&str> = TUNE.split('\n').collect();
    let mut hl = Highlighter::new();
    let mut per_line = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        for span in hl.line_spans(&lines, idx) {
            per_line.push((span.tag, &line[span.start..span.end]));
        }
    }
    assert_eq!(per_line, whole);
}

#[test]
fn step_by_step_driving() {
    let lexer = AbcLexer::new();
    let text = "K:D\nd";
    let (first, state) = lexer.step(text, 0, ScannerState::default());
    assert_eq!((first.end, first.tag), (2, Some(TokenTag::Header)));
    assert!(!state.in_header);

    let (second, state) = lexer.step(text, first.end, state);
    assert_eq!(second.tag, Some(TokenTag::Note));
    let (third, _) = lexer.step(text, second.end, state);
    assert_eq!(third.tag, None);
}

#[test]
fn generated_texts_round_trip() {
    let lexer = AbcLexer::new();
    let mut rng = StdRng::seed_from_u64(0xabc);

    for _ in 0..2000 {
        let text = random_text(&mut rng);
        let mut pos = 0;
        let mut state = ScannerState::default();
        let mut rebuilt = String::new();
        let mut tagged = Vec::new();

        while pos < text.len() {
            let (step, next) = lexer.step(&text, pos, state);
            assert_eq!(step.start, pos);
            assert!(step.end > pos, "no progress at {} in {:?}", pos, text);
            assert!(text.is_char_boundary(step.end));
            if !state.in_header {
                assert!(!next.in_header);
            }
            rebuilt.push_str(&text[step.start..step.end]);
            if let Some(tag) = step.tag {
                tagged.push((tag, &text[step.start..step.end]));
            }
            pos = step.end;
            state = next;
        }
        assert_eq!(rebuilt, text);

        let doc = Document::new(text.as_str());
        let tokens: Vec<_> = lexer.tokens(&text).map(|t| (t.tag, token_text(&doc, &t))).collect();
        assert_eq!(tokens, tagged);
    }
}
