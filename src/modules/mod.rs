//! Conversion modules.
//!
//! A module registers a family of conversions in one go. Modules tied to an
//! optional library report it through
//! [`ConversionModule::is_available`] and are skipped when it returns false.
//!
//! - **defaults** - numeric widening and narrowing, text and character
//!   conversions (always installed unless disabled in the config)
//! - **chrono** - timestamps and dates as `chrono` types (cargo feature `chrono`)

use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

pub mod chrono;
pub mod defaults;

pub use self::chrono::ChronoConversions;
pub use self::defaults::DefaultConversions;

/// A bundle of conversions installed together.
pub trait ConversionModule {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the module can be used in this build. Must have no side effects.
    fn is_available(&self) -> bool {
        true
    }

    /// Register the module's conversions, and any types they name.
    fn register(&self, types: &mut TypeRegistry, conversions: &mut TypeConversionRegistry);
}

/// Optional modules checked when module detection is enabled.
pub fn detectable_modules() -> Vec<Box<dyn ConversionModule>> {
    vec![Box::new(ChronoConversions)]
}
