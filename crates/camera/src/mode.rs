use serde::{Deserialize, Serialize};

/// Which camera drives the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraMode {
    /// Attached to the active unit.
    FirstPerson,
    /// Orbiting the active unit.
    #[default]
    ThirdPerson,
    FreeFly,
}

impl CameraMode {
    /// Third-person and first-person swap; free-fly returns to third-person.
    pub fn toggle_person(self) -> Self {
        match self {
            Self::ThirdPerson => Self::FirstPerson,
            Self::FirstPerson | Self::FreeFly => Self::ThirdPerson,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstPerson => "first-person",
            Self::ThirdPerson => "third-person",
            Self::FreeFly => "free-fly",
        }
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_toggle() {
        assert_eq!(CameraMode::ThirdPerson.toggle_person(), CameraMode::FirstPerson);
        assert_eq!(CameraMode::FirstPerson.toggle_person(), CameraMode::ThirdPerson);
        assert_eq!(CameraMode::FreeFly.toggle_person(), CameraMode::ThirdPerson);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&CameraMode::FreeFly).unwrap();
        assert_eq!(json, "\"free-fly\"");
        assert_eq!(CameraMode::default().to_string(), "third-person");
    }
}
