//! Prompt templates for the image paths.

use std::path::Path;

/// Prompt for the structured-text (SVG) path.
///
/// The model is asked to answer with a JSON object matching the response
/// schema sent alongside the prompt.
pub fn build_svg_prompt(instructions: &str, file_path: &Path, mime: &str) -> String {
    format!(
        r#"
# Role
You are a skilled graphic designer and web designer. Generate an SVG based on the following information.

# Output File Path
{path}

# Output Image MIME Type
{mime}

# Prerequisites
- Follow the instructions exactly. Do not make unrelated changes.

# Important: Output Rules
- **No omissions are allowed**. You must output the **complete file content from beginning to end**.

# Result Format
Output in the following JSON format.
{{
    "filePath": "The output file path",
    "data": "The complete generated file content without any omissions",
    "mime": "The MIME type of the generated file",
    "check": "true if the prompt instructions were followed, false otherwise"
}}

# Instructions
{instructions}

"#,
        path = file_path.display(),
    )
}

/// Prompt for the binary-image path
pub fn build_image_prompt(instructions: &str, file_path: &Path, mime: &str) -> String {
    format!(
        r#"
# Role
You are a skilled graphic designer and web designer. Generate an image based on the following information.

# Output File Path
{path}

# Output Image MIME Type
{mime}

# Prerequisites
- Follow the instructions exactly. Do not make unrelated changes.

# Instructions
{instructions}

"#,
        path = file_path.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_prompt_embeds_fields_and_schema() {
        let prompt = build_svg_prompt("a red circle", Path::new("out/logo.svg"), "image/svg+xml");
        assert!(prompt.contains("out/logo.svg"));
        assert!(prompt.contains("image/svg+xml"));
        assert!(prompt.contains("\"check\""));
        assert!(prompt.trim_end().ends_with("a red circle"));
    }

    #[test]
    fn test_image_prompt_has_no_result_format() {
        let prompt = build_image_prompt("a cat", Path::new("cat.png"), "image/png");
        assert!(prompt.contains("Generate an image"));
        assert!(!prompt.contains("Result Format"));
    }
}
