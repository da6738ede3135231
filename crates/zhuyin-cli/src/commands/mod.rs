macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy_ops;
pub mod annotate_ops;
pub mod config_ops;
pub mod dict_ops;

use zhuyin_core::settings::settings;
use zhuyin_service::{ResourceLocation, Resources};

/// Resources from settings, with command-line overrides.
pub fn resources(dict: Option<&str>, tones: Option<&str>) -> Resources {
    let mut resources = Resources::from_settings(settings());
    if let Some(dict) = dict {
        resources.dictionary = ResourceLocation::parse(dict);
    }
    if let Some(tones) = tones {
        resources.tones = Some(ResourceLocation::parse(tones));
    }
    resources
}
