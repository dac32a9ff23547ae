/// Instruction sent with every sketch. The model is asked to play the
/// guesser and answer with a single JSON object.
pub const DEFAULT_PROMPT: &str = r#"你是一个猜谜游戏中的猜谜者。用户会给你一幅画，你需要猜测这幅画画的是什么。
只返回一个最可能的词组（例如："一只猫"、"太阳"、"汽车"等），不要返回其他内容。
同时给出一个 0-100 的置信度分数，表示你对猜测的自信程度。

请严格按照以下 JSON 格式返回，不要包含任何其他内容：
{"guess": "猜测的词组", "confidence": 置信度分数}"#;

pub fn resolve(custom: Option<&str>) -> &str {
    match custom {
        Some(prompt) if !prompt.trim().is_empty() => prompt,
        _ => DEFAULT_PROMPT,
    }
}
