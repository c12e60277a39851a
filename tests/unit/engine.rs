//! Validates synthesizer construction: output sizing and input checks

use texweave::{Pixmap, SynthError, Synthesizer};

fn corpus(width: usize, height: usize) -> Pixmap {
    Pixmap::new(width, height, 3)
}

#[test]
fn test_explicit_output_size() {
    let synthesizer = Synthesizer::new(corpus(16, 12), 40, 30).expect("valid inputs");
    assert_eq!(synthesizer.width(), 40);
    assert_eq!(synthesizer.height(), 30);
    assert_eq!(synthesizer.channels(), 3);
}

#[test]
fn test_positive_scale_multiplies_corpus_dimensions() {
    let synthesizer = Synthesizer::with_scale(corpus(16, 12), 2).expect("valid inputs");
    assert_eq!(synthesizer.width(), 32);
    assert_eq!(synthesizer.height(), 24);
}

#[test]
fn test_negative_scale_forces_a_square() {
    let synthesizer = Synthesizer::with_scale(corpus(16, 12), -48).expect("valid inputs");
    assert_eq!(synthesizer.width(), 48);
    assert_eq!(synthesizer.height(), 48);
}

#[test]
fn test_zero_scale_falls_back_to_the_historical_default() {
    let synthesizer = Synthesizer::with_scale(corpus(16, 12), 0).expect("valid inputs");
    assert_eq!(synthesizer.width(), 256);
    assert_eq!(synthesizer.height(), 256);
}

#[test]
fn test_output_starts_zeroed() {
    let synthesizer = Synthesizer::new(corpus(4, 4), 8, 8).expect("valid inputs");
    assert!(synthesizer.pixels().iter().all(|&byte| byte == 0));
    assert_eq!(synthesizer.pixels().len(), 8 * 8 * 3);
}

#[test]
fn test_unsupported_channel_count_is_rejected() {
    let five_channel = Pixmap::new(4, 4, 5);
    let error = Synthesizer::new(five_channel, 8, 8).expect_err("five channels must be rejected");
    assert!(matches!(
        error,
        SynthError::UnsupportedChannels { channels: 5 }
    ));
}
