use serde::{Deserialize, Serialize};
use serde_json::Value;
use slider_core::PuzzleConfig;
use slider_core::catalog::{has_any, sanitize_backgrounds};

/// Board handed to `encodePuzzle` by the generator page. Backgrounds are
/// taken loosely and cleaned up before encoding.
#[derive(Clone, Debug, Deserialize)]
pub struct EncodeRequest {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<u32>,
    #[serde(default)]
    pub backgrounds: Value,
}

impl From<EncodeRequest> for PuzzleConfig {
    fn from(req: EncodeRequest) -> Self {
        let total = req.width * req.height;
        let config = PuzzleConfig::new(req.width, req.height, req.tiles);
        if req.backgrounds.is_array() {
            let backgrounds = sanitize_backgrounds(&req.backgrounds, total);
            if has_any(&backgrounds) {
                return config.with_backgrounds(backgrounds);
            }
        }
        config
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MoveResult {
    pub tiles: Vec<u32>,
    pub moved: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShareResult {
    pub payload: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn loose_backgrounds_are_cleaned() {
        let req: EncodeRequest = serde_json::from_value(json!({
            "width": 2,
            "height": 1,
            "tiles": [1, 0],
            "backgrounds": ["cup.png", 4],
        }))
        .unwrap();
        let config = PuzzleConfig::from(req);
        assert_eq!(config.backgrounds, Some(vec!["cup.png".to_string(), String::new()]));
    }

    #[test]
    fn missing_or_empty_backgrounds_are_omitted() {
        for backgrounds in [json!(null), json!(["", ""]), json!("cup.png")] {
            let req: EncodeRequest = serde_json::from_value(json!({
                "width": 2,
                "height": 1,
                "tiles": [1, 0],
                "backgrounds": backgrounds,
            }))
            .unwrap();
            assert_eq!(PuzzleConfig::from(req).backgrounds, None);
        }
    }
}
