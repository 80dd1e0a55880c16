//! Enumerations served by the API.
//!
//! Wire values are the Spanish labels the backend stores verbatim (including
//! spaces and accents), so every variant carries an explicit `rename`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Label used on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown {} '{value}' (expected one of: {})", stringify!($name), allowed.join(", "))
                    })
            }
        }
    };
}

wire_enum! {
    /// Account role. Administrators manage the catalog; users see the plans
    /// of their own career or area.
    UserRole {
        Admin => "Administrador",
        User => "Usuario",
    }
}

wire_enum! {
    /// Which strategic plan a line belongs to.
    PlanScope {
        Institutional => "Plan institucional",
        National => "Plan nacional",
    }
}

wire_enum! {
    /// Measurement / reporting frequency.
    Frequency {
        Monthly => "Mensual",
        Quarterly => "Trimestral",
        Biannual => "Semestral",
        Annual => "Anual",
    }
}

wire_enum! {
    IndicatorStatus {
        Active => "Activo",
        Inactive => "Inactivo",
        InReview => "En Revisión",
        Completed => "Completado",
    }
}

wire_enum! {
    /// Progress of an activity inside a plan. Any state may be set at any time.
    ActivityStatus {
        Pending => "Pendiente",
        InProgress => "En Progreso",
        Completed => "Completada",
        Cancelled => "Cancelada",
    }
}

wire_enum! {
    /// Organizational unit a plan is attached to.
    PlanKind {
        Career => "carrera",
        Area => "area",
    }
}

wire_enum! {
    EvidenceKind {
        File => "archivo",
        Image => "imagen",
    }
}

impl Default for PlanScope {
    fn default() -> Self {
        Self::Institutional
    }
}
