use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownChoice;

// Chaque variante : (valeur JSON, nom court, libellé affiché).
// La première variante est la valeur par défaut du formulaire.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($wire:literal, $short:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Toutes les options, dans l'ordre du formulaire.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Champ JSON qui porte ce choix.
            pub const FIELD: &'static str = $field;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn short_name(self) -> &'static str {
                match self {
                    $($name::$variant => $short,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Accepte la valeur étiquetée (`"(a) in-unit"`) ou le nom court
        /// (`"in-unit"`), sans tenir compte de la casse ASCII ni des espaces.
        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| {
                        choice.as_str().eq_ignore_ascii_case(wanted)
                            || choice.short_name().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| UnknownChoice {
                        field: $field,
                        value: wanted.to_string(),
                    })
            }
        }
    };
}

choice_enum! {
    /// Équipement de lavage du logement.
    Laundry, "laundry" {
        InUnit => ("(a) in-unit", "in-unit", "In-Unit"),
        OnSite => ("(b) on-site", "on-site", "On-Site"),
        NoLaundry => ("(c) no laundry", "no laundry", "No Laundry"),
    }
}

choice_enum! {
    /// Animaux acceptés par le propriétaire.
    PetPolicy, "pets" {
        Both => ("(a) both", "both", "Dogs & Cats"),
        Dogs => ("(b) dogs", "dogs", "Dogs Only"),
        Cats => ("(c) cats", "cats", "Cats Only"),
        NoPets => ("(d) no pets", "no pets", "No Pets"),
    }
}

choice_enum! {
    HousingType, "housing_type" {
        Single => ("(a) single", "single", "Single Family"),
        Double => ("(b) double", "double", "Duplex"),
        Multi => ("(c) multi", "multi", "Multi-Family"),
    }
}

choice_enum! {
    Parking, "parking" {
        Unknown => ("(a) unknown", "unknown", "Unknown"),
        Protected => ("(b) protected", "protected", "Protected/Garage"),
        OffStreet => ("(c) off-street", "off-street", "Off-Street"),
        NoParking => ("(d) no parking", "no parking", "No Parking"),
    }
}
