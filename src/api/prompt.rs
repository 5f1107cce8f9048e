use crate::form::FormParams;

const CLIP_EXAMPLE: &str = r#"{
    "shot": { "composition": "Medium shot, 50mm lens", "camera_motion": "Slow pan left", "frame_rate": "24fps", "film_grain": "Light grain" },
    "subject": { "description": "[Detailed character action, referencing character_sheet]", "wardrobe": "[Clothing consistent with character_sheet]" },
    "scene": { "location": "[Location details]", "time_of_day": "Golden hour", "environment": "[Weather, background elements]" },
    "visual_details": { "action": "[Specific action and sound effects in brackets like [sound]]", "props": "[Relevant props]" },
    "cinematography": { "lighting": "[Lighting style]", "tone": "[Overall mood]", "notes": "[Special instructions]" },
    "audio": { "ambient": "[Background sounds]", "voice": { "tone": "Calm", "style": "Narrative" }, "music": "[Music style]" },
    "color_palette": "[Dominant colors]",
    "dialogue": { "character": "CHAR_01", "line": "This is it.", "subtitles": false },
    "narration_clip": "The final moment had arrived."
}"#;

/// Builds the single prompt sent to the model for one production package.
pub fn build_prompt(params: &FormParams, writing_style_desc: &str) -> String {
    format!(
        r#"**YOU ARE AN AI DIRECTOR, SCRIPTWRITER & SOCIAL MEDIA EXPERT.**

**CONTEXT:** A user needs a complete production package from a theme, specifically for the VEO 3 model.

**INPUT THEME:** "{theme}"

**STYLE OPTIONS:**
* Total Duration: "{duration} seconds"
* Visual Style: "{visual}"
* Image Style: "{image}"
* Writing Style: "{writing}" ({writing_desc})
* Subtitle Language: "{language}"
* Aspect Ratio: "{aspect}"

**CORE STYLE BIBLE:**
You MUST treat the following styles as the absolute source of truth. Every single prompt and description you generate must strictly adhere to this bible.
- **Master Visual Style:** {visual}
- **Master Image Style:** {image}

**ABSOLUTE RULES:**
1.  **CHARACTER CONSISTENCY:** First, create a "character_sheet" array. For each character, create an object with a unique "character_id" (e.g., "CHAR_01") and a very detailed, consistent "description" (physical appearance, clothing, key accessories). You MUST reference these exact "character_id"s and their detailed descriptions in all subsequent prompts to ensure the character does not change.
2.  **VISUAL & STYLE CONSISTENCY:** For every **key_image_prompt** and every clip's subject/scene description, you MUST explicitly incorporate the "CORE STYLE BIBLE" to maintain a unified look. The prompt for scene 2 must visually and logically follow the end of scene 1, and so on, creating a coherent visual narrative.
3.  **SUBTITLES OFF:** The "subtitles" property within the "dialogue" object of every single clip MUST ALWAYS be **false**. This is a critical requirement for the VEO 3 pipeline.
4.  **SAFETY:** No graphic violence, gore, hate speech, or explicit sexual themes. Use metaphorical language for conflict.
5.  **PACING & CONTENT DENSITY:** The total spoken content should be dense and meaningful. For each scene, roughly 50% of the duration should be narration, and 30% should be character dialogue. Clips without spoken words are for visual storytelling. Narration should be broken into natural, short sentences.

**REQUIREMENTS:**
Your output MUST be a single, valid JSON object with THREE top-level keys: "character_sheet", "script", and "promotion".

**1. "character_sheet":** An array of character objects as per the rules.

**2. "script":** An array of scene objects, appropriately sized for the requested duration. For each scene, provide:
    *   **scene_number:** (Number)
    *   **scene_title:** (String)
    *   **key_image_prompt:** (String) A rich prompt for a text-to-image AI, strictly adhering to the "CORE STYLE BIBLE" and character descriptions.
    *   **characters_in_scene:** (Array of Strings) List of character_ids.
    *   **location_details:** (String)
    *   **lighting_tone:** (String)
    *   **color_palette:** (String)
    *   **clip_sequence:** (Array of Clip Objects) Each clip MUST follow the detailed JSON structure provided below.

**3. "promotion":** An object with marketing assets.
    *   **thumbnail_prompt:** (String)
    *   **social_media_posts:** (Object) with keys "youtube", "facebook", "tiktok", each with "title", "description", "hashtags" in the requested language.

**CLIP JSON STRUCTURE EXAMPLE (Follow this for EVERY clip):**
{clip_example}

**OUTPUT FORMAT:**
**RETURN ONLY A SINGLE, VALID JSON OBJECT** matching this structure. Do not wrap it in markdown.
"#,
        theme = params.theme,
        duration = params.duration_secs,
        visual = params.visual_style,
        image = params.image_style,
        writing = params.writing_style,
        writing_desc = writing_style_desc,
        language = params.language,
        aspect = params.aspect_ratio,
        clip_example = CLIP_EXAMPLE,
    )
}
