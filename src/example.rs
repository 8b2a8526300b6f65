use crate::args::{self, Format};
use crate::sampling::DesignSpec;

/// Render the built-in example spec in the requested format.
pub fn example_config(format: Format) -> args::ProcResult<String> {
    let spec = DesignSpec::default();
    Ok(match format {
        Format::Toml => toml::to_string_pretty(&spec)?,
        Format::Yaml => serde_yaml::to_string(&spec)?,
        Format::Json => serde_json::to_string_pretty(&spec)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_parses_back() {
        let toml_text = example_config(Format::Toml).unwrap();
        assert_eq!(toml::from_str::<DesignSpec>(&toml_text).unwrap(), DesignSpec::default());

        let yaml_text = example_config(Format::Yaml).unwrap();
        assert_eq!(serde_yaml::from_str::<DesignSpec>(&yaml_text).unwrap(), DesignSpec::default());

        let json_text = example_config(Format::Json).unwrap();
        assert_eq!(serde_json::from_str::<DesignSpec>(&json_text).unwrap(), DesignSpec::default());
    }

    #[test]
    fn example_mentions_the_instances() {
        let text = example_config(Format::Toml).unwrap();
        assert!(text.contains("[[coil.instances]]"));
        assert!(text.contains("pos_x"));
    }
}
