//! Module loading strategies.
//!
//! A [`ModuleLoader`] resolves a [`BundleRef`] plus a module export name into a
//! ready-to-instantiate [`ModuleFactory`]. Two strategies exist behind the one
//! asynchronous contract, chosen once at configuration time, never per call:
//!
//! - **Ahead-of-time**: extracts a name token from the reference's path hint
//! 	and asks a name-based [`ModuleRegistry`] to resolve a conventional path
//! 	of the form `../<name>/<name>.module#<ModuleExportName>`.
//! - **Just-in-time**: awaits the reference's pending namespace, pulls the
//! 	named export out of it, and submits it to a [`ModuleCompiler`].
//!
//! Calling code stays strategy-agnostic: both paths produce the same
//! [`ModuleFactory`] from which the resolver finds the same components.

use std::rc::Rc ;

use futures::future::LocalBoxFuture ;
use pipe_trait::Pipe ;
use thiserror::Error ;
use tracing::debug ;

use crate::bundle::{ BundleRef, RawModuleDef };
use crate::module::ModuleFactory ;

/// The process-wide, name-based module registry used by the ahead-of-time
/// strategy. Read-only from this subsystem's perspective: concurrent loads of
/// the same path must be safe to interleave.
pub trait ModuleRegistry {
	/// Resolves a conventional module path and loads its descriptor.
	fn resolve_and_load( &self, path: &str ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>>;
}

/// The compilation step used by the just-in-time strategy.
pub trait ModuleCompiler {
	/// Compiles a raw module definition into an instantiable descriptor.
	fn compile( &self, raw: RawModuleDef ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>>;
}

/// Errors produced while resolving a bundle reference into a module descriptor.
///
/// All of these are fatal for the load in question: the loader does not retry
/// and does not degrade.
#[derive( Error, Debug )]
pub enum LoadError {
	/// The bundle reference does not match the shape the strategy expects.
	#[error( "Malformed Reference: {0}" )] MalformedReference( String ),
	/// The just-in-time namespace has no export under the requested name.
	#[error( "Bundle has no export {0}" )] MissingExport( String ),
	/// The compilation step rejected the module definition.
	#[error( "Compilation Failed: {0}" )] CompilationFailed( #[source] Box<dyn std::error::Error> ),
	/// The registry has no module under the resolved path.
	#[error( "No module registered for {0}" )] ModuleUnregistered( String ),
}

/// A module loading strategy. See the [module docs]( self ) for the two variants.
#[derive( Clone )]
pub enum ModuleLoader {
	/// Resolves path hints through a name-based registry of precompiled modules.
	AheadOfTime { registry: Rc<dyn ModuleRegistry> },
	/// Awaits deferred namespaces and compiles their exports on demand.
	JustInTime { compiler: Rc<dyn ModuleCompiler> },
}

impl ModuleLoader {

	/// Creates the ahead-of-time strategy.
	pub fn ahead_of_time( registry: Rc<dyn ModuleRegistry> ) -> Self {
		Self::AheadOfTime { registry }
	}

	/// Creates the just-in-time strategy.
	pub fn just_in_time( compiler: Rc<dyn ModuleCompiler> ) -> Self {
		Self::JustInTime { compiler }
	}

	/// Resolves `bundle` + `module_name` into an instantiable module descriptor.
	///
	/// # Errors
	/// Returns a [`LoadError`] when the reference is malformed for the strategy,
	/// the export is missing, the registry has no entry, or compilation fails.
	/// Failures are surfaced unchanged; this subsystem never retries.
	pub async fn load( &self, bundle: &BundleRef, module_name: &str ) -> Result<ModuleFactory, LoadError> {
		match self {
			Self::AheadOfTime { registry } => Self::load_ahead_of_time( registry, bundle, module_name ).await,
			Self::JustInTime { compiler } => Self::load_just_in_time( compiler, bundle, module_name ).await,
		}
	}

	async fn load_ahead_of_time(
		registry: &Rc<dyn ModuleRegistry>,
		bundle: &BundleRef,
		module_name: &str,
	) -> Result<ModuleFactory, LoadError> {
		let BundleRef::AheadOfTime( hint ) = bundle else {
			return Err( LoadError::MalformedReference(
				"just-in-time reference passed to the ahead-of-time loader".to_string()
			));
		};
		let name = extract_name_token( hint )
			.ok_or_else(|| LoadError::MalformedReference( hint.clone() ))?;
		debug!( name, module_name, "resolving ahead-of-time module" );
		format!( "../{name}/{name}.module#{module_name}" )
			.pipe(| path | registry.resolve_and_load( &path ))
			.await
	}

	async fn load_just_in_time(
		compiler: &Rc<dyn ModuleCompiler>,
		bundle: &BundleRef,
		module_name: &str,
	) -> Result<ModuleFactory, LoadError> {
		let BundleRef::JustInTime( pending ) = bundle else {
			return Err( LoadError::MalformedReference(
				"ahead-of-time reference passed to the just-in-time loader".to_string()
			));
		};
		let namespace = pending.resolve().await ;
		let raw = namespace.get( module_name )
			.ok_or_else(|| LoadError::MissingExport( module_name.to_string() ))?
			.clone();
		debug!( module_name, "compiling just-in-time module" );
		compiler.compile( raw ).await
	}

}

impl std::fmt::Debug for ModuleLoader {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		match self {
			Self::AheadOfTime { .. } => f.write_str( "ModuleLoader::AheadOfTime" ),
			Self::JustInTime { .. } => f.write_str( "ModuleLoader::JustInTime" ),
		}
	}
}

/// Extracts the lowercase name token immediately preceding the first `.module`
/// occurrence in a path hint: `"lazy.module"` and `"../lazy.module"` both yield
/// `"lazy"`; hints without the pattern yield `None`.
fn extract_name_token( hint: &str ) -> Option<&str> {
	let prefix = &hint[ ..hint.find( ".module" )? ];
	prefix
		.rsplit(| c: char | !c.is_ascii_lowercase() )
		.next()
		.filter(| name | !name.is_empty() )
}
