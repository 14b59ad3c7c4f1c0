//! Destination → screen factory.
//!
//! The `match` below has no wildcard arm: adding a [`Destination`] variant
//! without a screen is a compile error.  Every call builds a fresh screen
//! from its default state, so re-opening a destination never sees state left
//! behind by an earlier visit.

use super::{
    BadgeDemo, BarChartDemo, ButtonDemo, CapsuleDemo, CircleDemo, DemoScreen, GaugeDemo, LabelDemo,
    PickerDemo, RectangleDemo, ScreenView, SliderDemo, SparklineDemo, StepperDemo, TextFieldDemo,
    ToggleDemo,
};
use crate::core::destination::Destination;

pub fn resolve(destination: Destination) -> Box<dyn ScreenView> {
    tracing::debug!(destination = %destination, "resolving screen");
    match destination {
        Destination::BarChart => Box::new(DemoScreen::<BarChartDemo>::new()),
        Destination::Gauge => Box::new(DemoScreen::<GaugeDemo>::new()),
        Destination::Sparkline => Box::new(DemoScreen::<SparklineDemo>::new()),
        Destination::Button => Box::new(DemoScreen::<ButtonDemo>::new()),
        Destination::Picker => Box::new(DemoScreen::<PickerDemo>::new()),
        Destination::Slider => Box::new(DemoScreen::<SliderDemo>::new()),
        Destination::Stepper => Box::new(DemoScreen::<StepperDemo>::new()),
        Destination::TextField => Box::new(DemoScreen::<TextFieldDemo>::new()),
        Destination::Toggle => Box::new(DemoScreen::<ToggleDemo>::new()),
        Destination::Capsule => Box::new(DemoScreen::<CapsuleDemo>::new()),
        Destination::Circle => Box::new(DemoScreen::<CircleDemo>::new()),
        Destination::Rectangle => Box::new(DemoScreen::<RectangleDemo>::new()),
        Destination::Badge => Box::new(DemoScreen::<BadgeDemo>::new()),
        Destination::Label => Box::new(DemoScreen::<LabelDemo>::new()),
    }
}
