//! Fixed prompt text sent to the model.

/// Instruction appended after the person and clothing images.
pub const TRY_ON_INSTRUCTION: &str = "Generate a photorealistic full-body image of the person \
in the first image wearing the clothing shown in the second image. Maintain the person's exact \
facial features, body shape, and pose. The clothing should fit naturally. High quality fashion \
photography, 4k resolution.";

/// Wrap a user's garment description in the product-shot template.
#[must_use]
pub fn clothing_description(prompt: &str) -> String {
    format!(
        "Professional fashion photography of {prompt}, isolated on a plain white background, \
         flat lay, high resolution, detailed texture."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clothing_description_embeds_prompt_verbatim() {
        assert_eq!(
            clothing_description("red silk gown"),
            "Professional fashion photography of red silk gown, isolated on a plain white \
             background, flat lay, high resolution, detailed texture."
        );
    }

    #[test]
    fn try_on_instruction_is_single_spaced() {
        assert!(!TRY_ON_INSTRUCTION.contains("  "));
        assert!(TRY_ON_INSTRUCTION.starts_with("Generate a photorealistic full-body image"));
        assert!(TRY_ON_INSTRUCTION.ends_with("4k resolution."));
    }
}
