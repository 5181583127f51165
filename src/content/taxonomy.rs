//! Multi-select taxonomies used to categorize showreels.

use serde::{Deserialize, Serialize};

/// A taxonomy value and its display label
pub type Term = (&'static str, &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Taxonomy {
    Industries,
    Styles,
    Techniques,
    SoundMusic,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 4] = [
        Taxonomy::Industries,
        Taxonomy::Styles,
        Taxonomy::Techniques,
        Taxonomy::SoundMusic,
    ];

    /// Frontmatter key holding this taxonomy
    pub fn key(self) -> &'static str {
        match self {
            Taxonomy::Industries => "industries",
            Taxonomy::Styles => "styles",
            Taxonomy::Techniques => "techniques",
            Taxonomy::SoundMusic => "soundMusic",
        }
    }

    pub fn terms(self) -> &'static [Term] {
        match self {
            Taxonomy::Industries => INDUSTRIES,
            Taxonomy::Styles => STYLES,
            Taxonomy::Techniques => TECHNIQUES,
            Taxonomy::SoundMusic => SOUND_MUSIC,
        }
    }

    pub fn contains(self, value: &str) -> bool {
        self.terms().iter().any(|(v, _)| *v == value)
    }
}

const INDUSTRIES: &[Term] = &[
    ("tech-saas", "Tech/SaaS"),
    ("fashion-luxury", "Fashion/Luxury"),
    ("advertising-commercial", "Advertising/Commercial"),
    ("entertainment-media", "Entertainment/Media"),
    ("finance-banking", "Finance/Banking"),
    ("automotive", "Automotive"),
    ("sports-fitness", "Sports/Fitness"),
    ("food-beverage", "Food/Beverage"),
    ("healthcare", "Healthcare"),
    ("education", "Education"),
    ("real-estate", "Real Estate"),
    ("other", "Other"),
];

const STYLES: &[Term] = &[
    ("minimal-clean", "Minimal/Clean"),
    ("bold-vibrant", "Bold/Vibrant"),
    ("3d-cgi", "3D/CGI"),
    ("hand-drawn", "Hand-drawn"),
    ("retro-vintage", "Retro/Vintage"),
    ("futuristic-tech", "Futuristic/Tech"),
    ("organic-natural", "Organic/Natural"),
    ("geometric-abstract", "Geometric/Abstract"),
    ("cinematic-dramatic", "Cinematic/Dramatic"),
    ("playful-quirky", "Playful/Quirky"),
    ("elegant-sophisticated", "Elegant/Sophisticated"),
    ("dark-moody", "Dark/Moody"),
];

const TECHNIQUES: &[Term] = &[
    ("2d-animation", "2D Animation"),
    ("3d-cgi", "3D/CGI"),
    ("mixed-media", "Mixed Media"),
    ("kinetic-typography", "Kinetic Typography"),
    ("motion-graphics", "Motion Graphics"),
    ("stop-motion", "Stop Motion"),
    ("live-action-vfx", "Live Action + VFX"),
    ("cel-animation", "Cel Animation"),
    ("liquid-simulation", "Liquid Simulation"),
    ("particle-effects", "Particle Effects"),
    ("character-animation", "Character Animation"),
    ("logo-animation", "Logo Animation"),
];

const SOUND_MUSIC: &[Term] = &[
    ("electronic-synth", "Electronic/Synth"),
    ("epic-cinematic", "Epic/Cinematic"),
    ("chill-ambient", "Chill/Ambient"),
    ("jazz-acoustic", "Jazz/Acoustic"),
    ("rock-energetic", "Rock/Energetic"),
    ("orchestral-classical", "Orchestral/Classical"),
    ("hip-hop-urban", "Hip-hop/Urban"),
    ("no-sound", "No Sound"),
    ("voiceover-heavy", "Voiceover Heavy"),
    ("sound-design-focused", "Sound Design Focused"),
];

/// Display label for a taxonomy value, or the value itself if unknown
pub fn label(taxonomy: Taxonomy, value: &str) -> &str {
    taxonomy
        .terms()
        .iter()
        .find(|(v, _)| *v == value)
        .map_or(value, |(_, l)| *l)
}
