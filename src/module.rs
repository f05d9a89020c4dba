//! Module descriptor and instance types.
//!
//! A [`ModuleFactory`] is the result of loading: an instantiable descriptor.
//! Calling [`create`]( ModuleFactory::create ) produces a live
//! [`ModuleInstance`] whose ownership transfers to the component host. The
//! instance must never be destroyed while a component created from it is still
//! mounted, and its destroy hook runs exactly once.

use std::rc::Rc ;

use crate::bundle::RawModuleDef ;
use crate::component::ComponentFactory ;

/// An instantiable module descriptor, produced by a loader strategy.
#[derive( Clone )]
pub struct ModuleFactory {
	name: String,
	components: Vec<ComponentFactory>,
	on_destroy: Option<Rc<dyn Fn()>>,
}

impl ModuleFactory {
	/// Creates a descriptor for a module exposing the given component registry.
	pub fn new(
		name: impl Into<String>,
		components: impl IntoIterator<Item = ComponentFactory>,
	) -> Self {
		Self {
			name: name.into(),
			components: components.into_iter().collect(),
			on_destroy: None,
		}
	}

	/// Installs a hook invoked when an instance created from this descriptor
	/// is destroyed.
	pub fn with_destroy_hook( mut self, hook: impl Fn() + 'static ) -> Self {
		self.on_destroy = Some( Rc::new( hook ));
		self
	}

	/// The module's export name.
	#[inline] pub fn name( &self ) -> &str { &self.name }

	/// Instantiates the module.
	pub fn create( &self ) -> ModuleInstance {
		ModuleInstance {
			name: self.name.clone(),
			components: self.components.clone(),
			on_destroy: self.on_destroy.clone(),
			destroyed: false,
		}
	}
}

impl From<RawModuleDef> for ModuleFactory {
	/// Passthrough conversion for module definitions that need no further
	/// compilation step.
	fn from( raw: RawModuleDef ) -> Self {
		let ( name, components ) = raw.into_parts();
		Self::new( name, components )
	}
}

impl std::fmt::Debug for ModuleFactory {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ModuleFactory" )
			.field( "name", &self.name )
			.field( "components", &self.components )
			.finish_non_exhaustive()
	}
}

/// A live, instantiated module owning a registry of component factories.
pub struct ModuleInstance {
	name: String,
	components: Vec<ComponentFactory>,
	on_destroy: Option<Rc<dyn Fn()>>,
	destroyed: bool,
}

impl ModuleInstance {
	/// The module's export name.
	#[inline] pub fn name( &self ) -> &str { &self.name }

	/// The module's registered component factories.
	#[inline] pub fn components( &self ) -> &[ComponentFactory] { &self.components }

	/// Runs the module's destroy hook. Idempotent: the hook fires exactly once.
	pub fn destroy( &mut self ) {
		if self.destroyed { return }
		self.destroyed = true ;
		if let Some( hook ) = &self.on_destroy { hook() }
	}

	/// Whether [`destroy`]( Self::destroy ) already ran.
	#[inline] pub fn is_destroyed( &self ) -> bool { self.destroyed }
}

impl std::fmt::Debug for ModuleInstance {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ModuleInstance" )
			.field( "name", &self.name )
			.field( "components", &self.components )
			.field( "destroyed", &self.destroyed )
			.finish_non_exhaustive()
	}
}
