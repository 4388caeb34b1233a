//! Hand-curated candidate pools for the rule-based fallback. Static
//! reference data; replacing or extending an entry is a content change,
//! not a logic change.

use crate::types::Label;

/// One curated activity with a baseline confidence score.
#[derive(Debug, Clone, Copy)]
pub struct CandidateActivity {
    pub title: &'static str,
    pub reason: &'static str,
    pub label: Label,
    pub confidence: i32,
}

/// Outdoor entry appended when the user insisted on outdoor against the
/// weather bias. Carries one reason per rain state.
#[derive(Debug, Clone, Copy)]
pub struct WarningActivity {
    pub title: &'static str,
    pub reason_rain: &'static str,
    pub reason_dry: &'static str,
    pub confidence: i32,
}

pub const INDOOR_POOL: [CandidateActivity; 5] = [
    CandidateActivity {
        title: "Museum or gallery visit",
        reason: "Browse exhibitions at your own pace while staying warm and dry.",
        label: Label::Indoor,
        confidence: 74,
    },
    CandidateActivity {
        title: "Specialty coffee crawl",
        reason: "Sample a few well-reviewed cafes and people-watch from a window seat.",
        label: Label::Indoor,
        confidence: 70,
    },
    CandidateActivity {
        title: "Cooking class or workshop",
        reason: "Learn a local dish hands-on; many studios take same-day bookings.",
        label: Label::Indoor,
        confidence: 66,
    },
    CandidateActivity {
        title: "Board game cafe session",
        reason: "Easy to fill a few hours with friends regardless of what the sky does.",
        label: Label::Indoor,
        confidence: 64,
    },
    CandidateActivity {
        title: "Library or bookstore afternoon",
        reason: "Quiet browsing with a reading nook makes a calm, zero-pressure plan.",
        label: Label::Indoor,
        confidence: 61,
    },
];

pub const OUTDOOR_POOL: [CandidateActivity; 5] = [
    CandidateActivity {
        title: "Old town walking tour",
        reason: "Cover the historic center on foot while the weather holds up.",
        label: Label::Outdoor,
        confidence: 75,
    },
    CandidateActivity {
        title: "Park picnic and stroll",
        reason: "Grab supplies from a market and settle in at the nearest green space.",
        label: Label::Outdoor,
        confidence: 71,
    },
    CandidateActivity {
        title: "Bike ride along the waterfront",
        reason: "Rent a city bike and follow the shoreline for easy scenery.",
        label: Label::Outdoor,
        confidence: 68,
    },
    CandidateActivity {
        title: "Street food market tour",
        reason: "Graze through the open-air stalls; go early to dodge the lunch rush.",
        label: Label::Outdoor,
        confidence: 65,
    },
    CandidateActivity {
        title: "Viewpoint sunset walk",
        reason: "A short climb to a lookout pays off when visibility is good.",
        label: Label::Outdoor,
        confidence: 62,
    },
];

/// Appended, in order, on the one label-mixing path.
pub const OUTDOOR_WARNING_POOL: [WarningActivity; 2] = [
    WarningActivity {
        title: "Short covered-market walk",
        reason_rain: "Mostly under cover if the rain picks up, but expect a damp route.",
        reason_dry: "Conditions outside are rough; keep it short and dress in layers.",
        confidence: 45,
    },
    WarningActivity {
        title: "Quick neighborhood photo walk",
        reason_rain: "Doable between showers, though shelter is scarce if rain returns.",
        reason_dry: "The weather is against long stays; keep the loop under an hour.",
        confidence: 42,
    },
];
