//! Assertion helpers for tests.

use std::process::Output;

use eink7_dither::Palette;

/// Assert the command exited successfully
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Expected success, got {}. Stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Assert the command failed and its stderr mentions `needle`
pub fn assert_failure_mentions(output: &Output, needle: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "Expected failure, got success");
    assert!(
        stderr.contains(needle),
        "Expected stderr to mention {needle:?}, got: {stderr}"
    );
}

/// Assert every pixel of an RGB buffer is a palette entry
pub fn assert_palette_only(pixels: &[u8], palette: &Palette) {
    for (i, px) in pixels.chunks_exact(3).enumerate() {
        assert!(
            palette.colors().iter().any(|c| c.to_bytes() == px),
            "Pixel {i} is {px:?}, not a palette color"
        );
    }
}
