//! Bundle references.
//!
//! A [`BundleRef`] represents a module not yet loaded. It is pure data,
//! immutable once constructed, and supplied by the caller: the ahead-of-time
//! variant encodes a path hint for a name-based registry, the just-in-time
//! variant carries the pending namespace of a deferred import.

use std::collections::HashMap ;
use std::future::Future ;
use std::rc::Rc ;

use futures::future::{ FutureExt, LocalBoxFuture, Shared };

use crate::component::ComponentFactory ;

/// The export map of a just-in-time bundle: module export name to uncompiled
/// module definition.
pub type Namespace = Rc<HashMap<String, RawModuleDef>>;

/// An opaque reference to a module not yet loaded.
#[derive( Clone )]
pub enum BundleRef {
	/// A path hint for the ahead-of-time registry. Expected to contain a
	/// lowercase name token followed by `.module`, e.g. `"lazy.module"`.
	AheadOfTime( String ),
	/// The deferred namespace of a just-in-time import.
	JustInTime( PendingNamespace ),
}

impl BundleRef {
	/// Creates an ahead-of-time reference from a path hint.
	pub fn ahead_of_time( hint: impl Into<String> ) -> Self {
		Self::AheadOfTime( hint.into() )
	}

	/// Creates a just-in-time reference from a pending namespace.
	pub fn just_in_time( namespace: impl Future<Output = Namespace> + 'static ) -> Self {
		Self::JustInTime( PendingNamespace::new( namespace ))
	}
}

impl std::fmt::Debug for BundleRef {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		match self {
			Self::AheadOfTime( hint ) => f.debug_tuple( "AheadOfTime" ).field( hint ).finish(),
			Self::JustInTime( _ ) => f.debug_tuple( "JustInTime" ).field( &"<pending namespace>" ).finish(),
		}
	}
}

/// A shared handle to a namespace still being produced.
///
/// Cloning the handle shares the underlying future, so a bundle reference can
/// be cloned freely without re-triggering the import.
#[derive( Clone )]
pub struct PendingNamespace( Shared<LocalBoxFuture<'static, Namespace>> );

impl PendingNamespace {
	/// Wraps a namespace future into a shareable handle.
	pub fn new( namespace: impl Future<Output = Namespace> + 'static ) -> Self {
		Self( namespace.boxed_local().shared() )
	}

	/// Awaits the namespace.
	pub async fn resolve( &self ) -> Namespace {
		self.0.clone().await
	}
}

/// An uncompiled module definition: the raw value found under an export name
/// in a just-in-time namespace, before the compilation step.
#[derive( Clone )]
pub struct RawModuleDef {
	name: String,
	components: Vec<ComponentFactory>,
}

impl RawModuleDef {
	/// Creates a definition for a module exposing the given components.
	pub fn new(
		name: impl Into<String>,
		components: impl IntoIterator<Item = ComponentFactory>,
	) -> Self {
		Self {
			name: name.into(),
			components: components.into_iter().collect(),
		}
	}

	/// The module's export name.
	#[inline] pub fn name( &self ) -> &str { &self.name }

	/// The components the module registers.
	#[inline] pub fn components( &self ) -> &[ComponentFactory] { &self.components }

	pub(crate) fn into_parts( self ) -> ( String, Vec<ComponentFactory> ) {
		( self.name, self.components )
	}
}

impl std::fmt::Debug for RawModuleDef {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "RawModuleDef" )
			.field( "name", &self.name )
			.field( "components", &self.components )
			.finish()
	}
}
