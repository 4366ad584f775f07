use shared::WheelConfig;

/// Id of an optional `<script type="application/json">` element holding
/// wheel overrides.
pub const CONFIG_ELEMENT_ID: &str = "wheel-config";

pub fn load_wheel_config() -> WheelConfig {
    let text = gloo_utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());

    parse_wheel_config(text.as_deref())
}

/// Falls back to the default wheel when the document is absent or invalid.
pub fn parse_wheel_config(text: Option<&str>) -> WheelConfig {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return WheelConfig::default();
    };

    match WheelConfig::from_json(text) {
        Ok(config) => {
            log::info!("Loaded wheel config with {} colors", config.colors.len());
            config
        }
        Err(e) => {
            log::warn!("Ignoring wheel config: {}", e);
            WheelConfig::default()
        }
    }
}
