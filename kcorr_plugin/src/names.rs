//! Names of the surface parameters, as shown in the host's UI

use strum_macros::{EnumIter, FromRepr, IntoStaticStr};

/// Length of the longest name, excluding the NUL terminator
pub const MAX_NAME_LEN: usize = 10;

/// The user parameters of the surface, numbered the way the host numbers them (from `1`)
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum ModelParameter {
    #[strum(serialize = "Sigma")]
    Sigma = 1,
    #[strum(serialize = "Ref. Wave.")]
    RefWavelength = 2,
    #[strum(serialize = "B")]
    CorrelationLength = 3,
    #[strum(serialize = "S")]
    Slope = 4,
    /// Index difference for the scatter function viewer
    #[strum(serialize = "SFV1")]
    IndexDifferenceOverride = 5,
}

impl ModelParameter {
    pub fn name(self) -> &'static str { self.into() }
}

/// The name for the parameter at the host's `index`, or an empty string if there is no such parameter
pub fn param_name(index: u8) -> &'static str { ModelParameter::from_repr(index).map_or("", ModelParameter::name) }

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_match_host_ui() {
        let names: Vec<_> = ModelParameter::iter().map(ModelParameter::name).collect();
        assert_eq!(names, ["Sigma", "Ref. Wave.", "B", "S", "SFV1"]);
        assert_eq!(names.iter().map(|n| n.len()).max(), Some(MAX_NAME_LEN));
    }

    #[test]
    fn indices_start_at_one() {
        for (i, param) in ModelParameter::iter().enumerate() {
            assert_eq!(param as u8, i as u8 + 1);
            assert_eq!(param_name(i as u8 + 1), param.name());
        }
        assert_eq!(param_name(0), "");
        assert_eq!(param_name(6), "");
        assert_eq!(param_name(u8::MAX), "");
    }
}
