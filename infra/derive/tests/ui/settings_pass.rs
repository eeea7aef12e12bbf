use apphost_derive::settings_model;

#[settings_model(default = true)]
#[derive(Default)]
#[serde(rename_all = "PascalCase")]
pub struct DemoSettings {
    pub api_url: String,
    pub timeout: u64,
}

fn main() {
    let _ = DemoSettings::default().clone();
}
