//! The warning shown in place of an answer for blocked queries.

/// Category recorded for queries stopped by the safety gate.
pub const SAFETY_BLOCKED_CATEGORY: &str = "Safety Blocked";

/// Render the warning returned instead of an answer when `term` triggered the gate.
pub fn advisory_message(term: &str) -> String {
    format!(
        "### ⚠️ **SAFETY WARNING**\n\n\
         Your query mentions **'{term}'**, which indicates a potential health risk.\n\n\
         **Advisory:**\n\
         - Please consult a doctor or certified yoga therapist before attempting new poses.\n\
         - Yoga can be beneficial, but certain conditions require personalized modifications that an AI cannot safely prescribe.\n\
         - Consider gentle breathing exercises (Pranayama) or meditation instead of physical asanas."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_names_the_term() {
        let message = advisory_message("hernia");
        assert!(message.starts_with("### ⚠️ **SAFETY WARNING**\n\n"));
        assert!(message.contains("Your query mentions **'hernia'**"));
        assert!(message.contains("**Advisory:**\n- Please consult a doctor"));
        assert!(message.ends_with("instead of physical asanas."));
    }

    #[test]
    fn advisory_has_three_bullets() {
        let bullets = advisory_message("pain").lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(bullets, 3);
    }
}
