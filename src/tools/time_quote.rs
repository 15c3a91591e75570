use crate::mcp::contracts::TOOL_TIME_QUOTE;
use crate::registry::{ContentItem, ParameterSpec, RegistryError, ToolDescriptor, ToolRegistry};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const MORNING: [&str; 3] = [
    "Every morning is a new beginning. Take a deep breath and start again.",
    "Rise up, start fresh, see the bright opportunity in each day.",
    "Morning is the dream renewed, the heart refreshed, and the spirit revived.",
];

const AFTERNOON: [&str; 3] = [
    "Keep going! Your afternoon is full of potential.",
    "The afternoon knows what the morning never suspected.",
    "Success usually comes to those who are too busy to be looking for it.",
];

const EVENING: [&str; 3] = [
    "Evenings are proof that no matter what happens, every day can end beautifully.",
    "Relax and recharge; the best is yet to come.",
    "Evening is a time of real experimentation. You never want to look the same way.",
];

const NIGHT: [&str; 3] = [
    "Let the night take away all your worries.",
    "The darkest night produces the brightest stars.",
    "Good night. May your dreams be sweet and your worries be light.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Any hour outside 5..21, including out-of-range values, is night.
    pub fn from_hour(hour: i64) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn quotes(self) -> &'static [&'static str] {
        match self {
            TimeOfDay::Morning => &MORNING,
            TimeOfDay::Afternoon => &AFTERNOON,
            TimeOfDay::Evening => &EVENING,
            TimeOfDay::Night => &NIGHT,
        }
    }
}

pub fn quote_for_hour<R: Rng + ?Sized>(hour: i64, rng: &mut R) -> &'static str {
    TimeOfDay::from_hour(hour)
        .quotes()
        .choose(rng)
        .copied()
        .unwrap_or_default()
}

pub fn register(registry: &mut ToolRegistry, seed: Option<u64>) -> Result<(), RegistryError> {
    let rng = Mutex::new(seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64));

    registry.register(
        ToolDescriptor::new(TOOL_TIME_QUOTE, "Get a quote based on the hour of day")
            .param(ParameterSpec::declared("hour", "int")),
        move |args| {
            let hour = args.integer("hour")?;
            let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Ok(vec![ContentItem::text(quote_for_hour(hour, &mut *rng))])
        },
    )
}
