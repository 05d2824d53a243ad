use serde::{Deserialize, Serialize};

/// Illustration style requested from the image model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArtStyle {
    #[default]
    Cartoon,
    Watercolor,
    #[serde(rename = "Comic Book")]
    ComicBook,
    #[serde(rename = "Fantasy Art")]
    FantasyArt,
}

impl ArtStyle {
    pub const ALL: [ArtStyle; 4] = [
        ArtStyle::Cartoon,
        ArtStyle::Watercolor,
        ArtStyle::ComicBook,
        ArtStyle::FantasyArt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtStyle::Cartoon => "Cartoon",
            ArtStyle::Watercolor => "Watercolor",
            ArtStyle::ComicBook => "Comic Book",
            ArtStyle::FantasyArt => "Fantasy Art",
        }
    }
}

impl std::fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

macro_rules! prebuilt_voices {
    ($default:ident; $($name:ident),+ $(,)?) => {
        /// Prebuilt narration voices offered by the speech model
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = "text")]
        pub enum Voice {
            $($name),+
        }

        impl Voice {
            pub const ALL: &'static [Voice] = &[$(Voice::$name),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Voice::$name => stringify!($name)),+
                }
            }
        }

        impl Default for Voice {
            fn default() -> Self {
                Voice::$default
            }
        }

        impl std::str::FromStr for Voice {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($name) => Ok(Voice::$name),)+
                    other => Err(format!("Unknown voice: {}", other)),
                }
            }
        }
    };
}

prebuilt_voices!(Puck;
    Zephyr, Puck, Charon, Kore, Fenrir, Leda, Orus, Aoede,
    Callirrhoe, Autonoe, Enceladus, Iapetus, Umbriel, Algieba,
    Despina, Erinome, Algenib, Rasalgethi, Laomedeia, Achernar,
    Alnilam, Schedar, Gacrux, Pulcherrima, Achird, Zubenelgenubi,
    Vindemiatrix, Sadachbia, Sadaltager, Sulafat,
);

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
