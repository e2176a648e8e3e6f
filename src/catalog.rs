//! Static catalog of every activity the planner knows about.
//!
//! Activities are identified by the closed [`ActivityId`] enum; its declaration
//! order is the catalog order used for display and for tie-breaking in the
//! day-at-a-glance summary. Sequencing is not derived from that order: each
//! chain has an explicit ordered list below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityId {
    HairMakeup,
    PartnerGettingReady,
    DetailPhotos,
    GettingDressed,
    FirstLook,
    PrivateVows,
    CouplePortraits,
    WeddingPartyPhotos,
    FamilyPhotos,
    GoldenHourPhotos,
    TravelToCeremony,
    GuestArrival,
    Ceremony,
    GroupPhoto,
    TravelToReception,
    CocktailHour,
    GrandEntrance,
    WelcomeToast,
    FirstDance,
    ParentDances,
    Toasts,
    CakeCutting,
    BouquetToss,
    Dinner,
    OpenDancing,
    LastDance,
    PrivateLastDance,
    GrandExit,
}

impl ActivityId {
    pub const ALL: [ActivityId; 28] = [
        ActivityId::HairMakeup,
        ActivityId::PartnerGettingReady,
        ActivityId::DetailPhotos,
        ActivityId::GettingDressed,
        ActivityId::FirstLook,
        ActivityId::PrivateVows,
        ActivityId::CouplePortraits,
        ActivityId::WeddingPartyPhotos,
        ActivityId::FamilyPhotos,
        ActivityId::GoldenHourPhotos,
        ActivityId::TravelToCeremony,
        ActivityId::GuestArrival,
        ActivityId::Ceremony,
        ActivityId::GroupPhoto,
        ActivityId::TravelToReception,
        ActivityId::CocktailHour,
        ActivityId::GrandEntrance,
        ActivityId::WelcomeToast,
        ActivityId::FirstDance,
        ActivityId::ParentDances,
        ActivityId::Toasts,
        ActivityId::CakeCutting,
        ActivityId::BouquetToss,
        ActivityId::Dinner,
        ActivityId::OpenDancing,
        ActivityId::LastDance,
        ActivityId::PrivateLastDance,
        ActivityId::GrandExit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityId::HairMakeup => "hair_makeup",
            ActivityId::PartnerGettingReady => "partner_getting_ready",
            ActivityId::DetailPhotos => "detail_photos",
            ActivityId::GettingDressed => "getting_dressed",
            ActivityId::FirstLook => "first_look",
            ActivityId::PrivateVows => "private_vows",
            ActivityId::CouplePortraits => "couple_portraits",
            ActivityId::WeddingPartyPhotos => "wedding_party_photos",
            ActivityId::FamilyPhotos => "family_photos",
            ActivityId::GoldenHourPhotos => "golden_hour_photos",
            ActivityId::TravelToCeremony => "travel_to_ceremony",
            ActivityId::GuestArrival => "guest_arrival",
            ActivityId::Ceremony => "ceremony",
            ActivityId::GroupPhoto => "group_photo",
            ActivityId::TravelToReception => "travel_to_reception",
            ActivityId::CocktailHour => "cocktail_hour",
            ActivityId::GrandEntrance => "grand_entrance",
            ActivityId::WelcomeToast => "welcome_toast",
            ActivityId::FirstDance => "first_dance",
            ActivityId::ParentDances => "parent_dances",
            ActivityId::Toasts => "toasts",
            ActivityId::CakeCutting => "cake_cutting",
            ActivityId::BouquetToss => "bouquet_toss",
            ActivityId::Dinner => "dinner",
            ActivityId::OpenDancing => "open_dancing",
            ActivityId::LastDance => "last_dance",
            ActivityId::PrivateLastDance => "private_last_dance",
            ActivityId::GrandExit => "grand_exit",
        }
    }

    pub fn definition(self) -> &'static ActivityDefinition {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity '{0}'")]
pub struct UnknownActivity(pub String);

impl FromStr for ActivityId {
    type Err = UnknownActivity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase().replace('-', "_");
        ActivityId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| UnknownActivity(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Preparation,
    PrivateMoment,
    Photography,
    PreMainEvent,
    MainEvent,
    ReceptionOpening,
    SocialReception,
    FormalRituals,
    Dinner,
    Closing,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Preparation,
        Section::PrivateMoment,
        Section::Photography,
        Section::PreMainEvent,
        Section::MainEvent,
        Section::ReceptionOpening,
        Section::SocialReception,
        Section::FormalRituals,
        Section::Dinner,
        Section::Closing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Preparation => "Getting Ready",
            Section::PrivateMoment => "Private Moments",
            Section::Photography => "Photography",
            Section::PreMainEvent => "Before the Ceremony",
            Section::MainEvent => "Ceremony",
            Section::ReceptionOpening => "Reception Opening",
            Section::SocialReception => "Cocktail Reception",
            Section::FormalRituals => "Formal Moments",
            Section::Dinner => "Dinner",
            Section::Closing => "Late Night",
        }
    }
}

/// Named sequential groups. Documentation only: the engine reads the explicit
/// order lists, not this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Preparation,
    PrivateMoment,
    Photography,
    Arrival,
    AfterCeremony,
    ReceptionOpening,
    Rituals,
    LateNight,
}

/// Preconditions an activity needs before it can be offered or scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    OffSiteCeremony,
    FirstLookPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub name: &'static str,
    pub icon: &'static str,
    pub default_duration: u32,
    pub section: Section,
    /// Time comes from direct input, never from a chain.
    pub is_anchor: bool,
    pub always_included: bool,
    /// Zero-duration point event.
    pub is_time_marker: bool,
    /// Sibling this activity may share a start time with.
    pub concurrent_with: Option<ActivityId>,
    pub chain: Option<Chain>,
    pub conditional: Option<Condition>,
    /// Formal rituals that may be placed before or after the meal.
    pub can_choose_timing: bool,
    /// Shorter duration used when photography moves into the cocktail window.
    pub cocktail_duration: Option<u32>,
}

impl ActivityDefinition {
    const fn new(
        id: ActivityId,
        name: &'static str,
        icon: &'static str,
        default_duration: u32,
        section: Section,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            default_duration,
            section,
            is_anchor: false,
            always_included: false,
            is_time_marker: false,
            concurrent_with: None,
            chain: None,
            conditional: None,
            can_choose_timing: false,
            cocktail_duration: None,
        }
    }

    const fn anchor(self) -> Self {
        Self { is_anchor: true, ..self }
    }

    const fn always(self) -> Self {
        Self { always_included: true, ..self }
    }

    const fn marker(self) -> Self {
        Self { is_time_marker: true, ..self }
    }

    const fn alongside(self, sibling: ActivityId) -> Self {
        Self { concurrent_with: Some(sibling), ..self }
    }

    const fn in_chain(self, chain: Chain) -> Self {
        Self { chain: Some(chain), ..self }
    }

    const fn only_when(self, condition: Condition) -> Self {
        Self { conditional: Some(condition), ..self }
    }

    const fn timing_choice(self) -> Self {
        Self { can_choose_timing: true, ..self }
    }

    const fn cocktail(self, minutes: u32) -> Self {
        Self { cocktail_duration: Some(minutes), ..self }
    }

    pub fn can_be_concurrent(&self) -> bool {
        self.concurrent_with.is_some()
    }
}

use ActivityId as A;

pub static CATALOG: [ActivityDefinition; 28] = [
    ActivityDefinition::new(A::HairMakeup, "Hair & Makeup", "💄", 120, Section::Preparation)
        .always()
        .in_chain(Chain::Preparation),
    ActivityDefinition::new(A::PartnerGettingReady, "Partner Getting Ready", "👔", 60, Section::Preparation)
        .alongside(A::HairMakeup)
        .in_chain(Chain::Preparation),
    ActivityDefinition::new(A::DetailPhotos, "Detail Photos", "💍", 20, Section::Preparation)
        .alongside(A::HairMakeup)
        .in_chain(Chain::Preparation),
    ActivityDefinition::new(A::GettingDressed, "Getting Dressed", "👗", 30, Section::Preparation)
        .always()
        .in_chain(Chain::Preparation),
    ActivityDefinition::new(A::FirstLook, "First Look", "💞", 15, Section::PrivateMoment)
        .in_chain(Chain::PrivateMoment)
        .only_when(Condition::FirstLookPath),
    ActivityDefinition::new(A::PrivateVows, "Private Vow Reading", "📜", 10, Section::PrivateMoment)
        .in_chain(Chain::PrivateMoment)
        .only_when(Condition::FirstLookPath),
    ActivityDefinition::new(A::CouplePortraits, "Couple Portraits", "📸", 30, Section::Photography)
        .in_chain(Chain::Photography)
        .cocktail(15),
    ActivityDefinition::new(A::WeddingPartyPhotos, "Wedding Party Photos", "👯", 30, Section::Photography)
        .in_chain(Chain::Photography)
        .cocktail(20),
    ActivityDefinition::new(A::FamilyPhotos, "Family Photos", "👨‍👩‍👧", 30, Section::Photography)
        .in_chain(Chain::Photography)
        .cocktail(20),
    ActivityDefinition::new(A::GoldenHourPhotos, "Golden Hour Portraits", "🌅", 20, Section::Photography),
    ActivityDefinition::new(A::TravelToCeremony, "Travel to Ceremony", "🚗", 30, Section::PreMainEvent)
        .in_chain(Chain::Arrival)
        .only_when(Condition::OffSiteCeremony),
    ActivityDefinition::new(A::GuestArrival, "Guests Arrive", "🪑", 0, Section::PreMainEvent)
        .always()
        .marker()
        .in_chain(Chain::Arrival),
    ActivityDefinition::new(A::Ceremony, "Ceremony", "💒", 30, Section::MainEvent)
        .anchor()
        .always(),
    ActivityDefinition::new(A::GroupPhoto, "Everyone Group Photo", "🧑‍🤝‍🧑", 10, Section::MainEvent)
        .in_chain(Chain::AfterCeremony),
    ActivityDefinition::new(A::TravelToReception, "Travel to Reception", "🚌", 30, Section::MainEvent)
        .in_chain(Chain::AfterCeremony)
        .only_when(Condition::OffSiteCeremony),
    ActivityDefinition::new(A::CocktailHour, "Cocktail Hour", "🍸", 60, Section::SocialReception)
        .always(),
    ActivityDefinition::new(A::GrandEntrance, "Grand Entrance", "🎉", 10, Section::ReceptionOpening)
        .always()
        .in_chain(Chain::ReceptionOpening),
    ActivityDefinition::new(A::WelcomeToast, "Welcome Toast", "🥂", 5, Section::ReceptionOpening)
        .in_chain(Chain::ReceptionOpening),
    ActivityDefinition::new(A::FirstDance, "First Dance", "💃", 5, Section::FormalRituals)
        .in_chain(Chain::Rituals)
        .timing_choice(),
    ActivityDefinition::new(A::ParentDances, "Parent Dances", "🕺", 8, Section::FormalRituals)
        .in_chain(Chain::Rituals)
        .timing_choice(),
    ActivityDefinition::new(A::Toasts, "Toasts & Speeches", "🎤", 20, Section::FormalRituals)
        .in_chain(Chain::Rituals)
        .timing_choice(),
    ActivityDefinition::new(A::CakeCutting, "Cake Cutting", "🎂", 10, Section::FormalRituals)
        .in_chain(Chain::Rituals)
        .timing_choice(),
    ActivityDefinition::new(A::BouquetToss, "Bouquet Toss", "💐", 5, Section::FormalRituals)
        .in_chain(Chain::Rituals)
        .timing_choice(),
    ActivityDefinition::new(A::Dinner, "Dinner Service", "🍽️", 75, Section::Dinner).always(),
    ActivityDefinition::new(A::OpenDancing, "Open Dancing", "🪩", 120, Section::Closing),
    ActivityDefinition::new(A::LastDance, "Last Dance", "🎶", 5, Section::Closing)
        .in_chain(Chain::LateNight),
    ActivityDefinition::new(A::PrivateLastDance, "Private Last Dance", "🌙", 5, Section::Closing)
        .in_chain(Chain::LateNight),
    ActivityDefinition::new(A::GrandExit, "Grand Exit", "✨", 10, Section::Closing)
        .in_chain(Chain::LateNight),
];

pub const PREPARATION_ORDER: &[ActivityId] = &[
    A::HairMakeup,
    A::PartnerGettingReady,
    A::DetailPhotos,
    A::GettingDressed,
];

pub const PRIVATE_MOMENT_ORDER: &[ActivityId] = &[A::FirstLook, A::PrivateVows];

/// Photography before the ceremony on the first-look path.
pub const PRE_CEREMONY_PHOTO_ORDER: &[ActivityId] = &[
    A::CouplePortraits,
    A::WeddingPartyPhotos,
    A::FamilyPhotos,
];

/// Photography inside the cocktail window: family first so relatives can
/// join the reception, couple last.
pub const COCKTAIL_PHOTO_ORDER: &[ActivityId] = &[
    A::FamilyPhotos,
    A::WeddingPartyPhotos,
    A::CouplePortraits,
];

pub const AFTER_CEREMONY_ORDER: &[ActivityId] = &[A::GroupPhoto, A::TravelToReception];

pub const RECEPTION_OPENING_ORDER: &[ActivityId] = &[A::GrandEntrance, A::WelcomeToast];

pub const RITUAL_ORDER: &[ActivityId] = &[
    A::FirstDance,
    A::ParentDances,
    A::Toasts,
    A::CakeCutting,
    A::BouquetToss,
];

pub const LATE_NIGHT_ORDER: &[ActivityId] = &[A::LastDance, A::PrivateLastDance, A::GrandExit];

pub fn definitions() -> impl Iterator<Item = &'static ActivityDefinition> {
    CATALOG.iter()
}

pub fn definitions_in(section: Section) -> impl Iterator<Item = &'static ActivityDefinition> {
    CATALOG.iter().filter(move |def| def.section == section)
}

/// Ordered member list for chains that have a single fixed order.
pub fn chain_order(chain: Chain) -> &'static [ActivityId] {
    match chain {
        Chain::Preparation => PREPARATION_ORDER,
        Chain::PrivateMoment => PRIVATE_MOMENT_ORDER,
        Chain::Photography => COCKTAIL_PHOTO_ORDER,
        Chain::Arrival => &[A::TravelToCeremony, A::GuestArrival],
        Chain::AfterCeremony => AFTER_CEREMONY_ORDER,
        Chain::ReceptionOpening => RECEPTION_OPENING_ORDER,
        Chain::Rituals => RITUAL_ORDER,
        Chain::LateNight => LATE_NIGHT_ORDER,
    }
}
