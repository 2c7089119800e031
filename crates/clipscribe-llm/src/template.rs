/// Token in a prompt template replaced with the video transcript
pub const TRANSCRIPTION_PLACEHOLDER: &str = "{transcription}";

/// Substitute the transcript into the first placeholder of `template`
///
/// The transcript is inserted literally; later placeholders are left as-is.
pub fn render_prompt(template: &str, transcription: &str) -> String {
    template.replacen(TRANSCRIPTION_PLACEHOLDER, transcription, 1)
}
