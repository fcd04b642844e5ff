//! Instruction text sent to the generative model.

/// Number of variations requested per generation.
pub const VARIATIONS: usize = 3;

/// Shape keywords the model is told it may use.
pub const SHAPE_TYPES: [&str; 3] = ["rectangle", "circle", "triangle"];

/// Output contract embedded in every prompt.
const DESIGN_SCHEMA_EXAMPLE: &str = r##"{
  "designs": [
    {
      "title": "Design Title",
      "description": "Brief description of the design concept",
      "colors": ["#hexcolor1", "#hexcolor2", "#hexcolor3"],
      "elements": ["text elements", "image suggestions", "shapes"],
      "layout": "layout description",
      "textElements": [
        {
          "text": "Main Title",
          "fontSize": 48,
          "fontWeight": "bold",
          "color": "#000000"
        },
        {
          "text": "Subtitle or description",
          "fontSize": 24,
          "fontWeight": "normal",
          "color": "#666666"
        }
      ],
      "shapes": [
        {
          "type": "rectangle",
          "color": "#ff0000",
          "width": 200,
          "height": 100
        }
      ]
    }
  ]
}"##;

/// Build the instruction for a user intent.
///
/// The caller is responsible for rejecting blank intents.
pub fn build_prompt(intent: &str) -> String {
    format!(
        r#"Create a detailed design specification for a canvas editor based on this request: "{intent}"

Please provide a JSON response with the following structure:
{schema}

Generate {variations} different design variations. Focus on practical, implementable designs.
Include specific color codes, element suggestions, layout descriptions, and specific text elements with formatting.
For shapes, use only these types: {shapes}.
Respond ONLY with valid JSON, no additional text or markdown formatting."#,
        intent = intent.trim(),
        schema = DESIGN_SCHEMA_EXAMPLE,
        variations = VARIATIONS,
        shapes = SHAPE_TYPES.join(", "),
    )
}
