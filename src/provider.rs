//! InstantiatorProvider - the entry point for resolution.
//!
//! The provider owns the type and conversion registries for one dialect.
//! Registration happens through `&mut` access during startup; afterwards
//! the provider is only read and can be shared between threads.
//!
//! # Example
//!
//! ```
//! use rowbind::{
//!     ClassBuilder, DataType, DefaultDialect, InstantiatorProvider, NamedTypeList, Value,
//! };
//!
//! struct Department {
//!     id: i64,
//!     name: String,
//! }
//!
//! let mut provider = InstantiatorProvider::new(DefaultDialect);
//! provider
//!     .register_class(
//!         ClassBuilder::<Department>::new("Department")
//!             .constructor(vec![DataType::LONG, DataType::STRING], |args| {
//!                 Ok(Department { id: args.next()?, name: args.next()? })
//!             })
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let columns = NamedTypeList::new()
//!     .with("id", DataType::INT)
//!     .with("name", DataType::STRING);
//! let instantiator = provider
//!     .find_instantiator(&DataType::named("Department"), &columns)
//!     .unwrap();
//!
//! let dept: Department = instantiator
//!     .instantiate_object(vec![Value::Int(7), Value::String("R&D".into())])
//!     .unwrap();
//! assert_eq!((dept.id, dept.name.as_str()), (7, "R&D"));
//! ```

use tracing::debug;

use rowbind_core::{
    ClassEntry, ConversionError, DataType, EnumEntry, NamedTypeList, RegistrationError,
    ResolutionError, TypeConversion, Value,
};
use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

use crate::constructor::resolve_instantiator;
use crate::conversion::{ResolutionContext, find_conversion};
use crate::dialect::{DefaultDialect, Dialect};
use crate::instantiator::Instantiator;
use crate::modules::{ConversionModule, DefaultConversions, detectable_modules};

/// Provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Install [`DefaultConversions`].
    pub default_conversions: bool,
    /// Check the optional modules and install those that are available.
    pub detect_modules: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_conversions: true,
            detect_modules: true,
        }
    }
}

/// Owns the registries and resolves instantiators and conversions.
pub struct InstantiatorProvider<D: Dialect = DefaultDialect> {
    dialect: D,
    types: TypeRegistry,
    conversions: TypeConversionRegistry,
}

impl<D: Dialect> InstantiatorProvider<D> {
    /// Create a provider with the default configuration.
    pub fn new(dialect: D) -> Self {
        Self::with_config(dialect, ProviderConfig::default())
    }

    /// Create a provider and install the modules `config` asks for.
    pub fn with_config(dialect: D, config: ProviderConfig) -> Self {
        let mut provider = Self {
            dialect,
            types: TypeRegistry::with_primitives(),
            conversions: TypeConversionRegistry::new(),
        };

        if config.default_conversions {
            provider.install_module(&DefaultConversions);
        }
        if config.detect_modules {
            for module in detectable_modules() {
                provider.install_module(module.as_ref());
            }
        }

        debug!(
            dialect = provider.dialect.name(),
            conversions = provider.conversions.from_db_count(),
            "instantiator provider ready"
        );
        provider
    }

    /// Install a conversion module if it reports itself available.
    ///
    /// Returns whether the module was installed.
    pub fn install_module(&mut self, module: &dyn ConversionModule) -> bool {
        if !module.is_available() {
            debug!(
                module = module.name(),
                "conversion module unavailable, skipping"
            );
            return false;
        }
        debug!(module = module.name(), "registering conversion module");
        module.register(&mut self.types, &mut self.conversions);
        true
    }

    // ==========================================================================
    // Registries
    // ==========================================================================

    /// The dialect outbound values are finally handed to.
    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn conversions(&self) -> &TypeConversionRegistry {
        &self.conversions
    }

    pub fn conversions_mut(&mut self) -> &mut TypeConversionRegistry {
        &mut self.conversions
    }

    /// Register a class with the type registry.
    pub fn register_class(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        self.types.register_class(entry)
    }

    /// Register an enum with the type registry.
    pub fn register_enum(&mut self, entry: EnumEntry) -> Result<(), RegistrationError> {
        self.types.register_enum(entry)
    }

    fn context(&self) -> ResolutionContext<'_> {
        ResolutionContext::new(&self.types, &self.conversions)
    }

    // ==========================================================================
    // Resolution
    // ==========================================================================

    /// Resolve a reusable instantiator for `target` from rows shaped like
    /// `columns`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn find_instantiator(
        &self,
        target: &DataType,
        columns: &NamedTypeList,
    ) -> Result<Instantiator, ResolutionError> {
        resolve_instantiator(target, columns, &self.context())
    }

    /// Find a conversion for reading `source` values as `target`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn find_conversion_from_db(
        &self,
        source: &DataType,
        target: &DataType,
    ) -> Option<TypeConversion> {
        find_conversion(source, target, &self.context())
    }

    /// Like [`find_conversion_from_db`](Self::find_conversion_from_db), but
    /// a missing conversion is an error.
    pub fn get_conversion_from_db(
        &self,
        source: &DataType,
        target: &DataType,
    ) -> Result<TypeConversion, ResolutionError> {
        self.find_conversion_from_db(source, target)
            .ok_or_else(|| ResolutionError::NoConversion {
                source_type: self.types.type_name(source),
                target_type: self.types.type_name(target),
            })
    }

    // ==========================================================================
    // Outbound
    // ==========================================================================

    /// Prepare an application value for the database.
    ///
    /// A registered outbound conversion for the value's runtime type wins.
    /// Otherwise enums are sent as their case name, and everything else is
    /// left to the dialect.
    pub fn value_to_database(&self, value: Value) -> Result<Value, ConversionError> {
        let Some(runtime_type) = value.data_type() else {
            return Ok(Value::Null);
        };

        let registry = &self.conversions;
        if let Some(conversion) = registry.find_conversion_to_db(&runtime_type, &self.types) {
            return conversion.convert(value);
        }

        Ok(match value {
            Value::Enum(e) => self.dialect.value_to_database(Value::String(e.name)),
            other => self.dialect.value_to_database(other),
        })
    }
}
