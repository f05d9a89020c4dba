//! Component resolution within a loaded module.

use itertools::Itertools ;
use thiserror::Error ;

use crate::component::ComponentFactory ;
use crate::module::ModuleInstance ;

/// Errors produced while looking up a component factory by selector.
#[derive( Error, Debug )]
pub enum ResolveError {
	/// No registered factory matches the selector.
	#[error( "Cannot find component {selector} in {module}. Make sure it exists and is registered as an entry component." )]
	ComponentNotFound { selector: String, module: String },
	/// More than one registered factory matches the selector. Ambiguity is an
	/// error, never a silent pick.
	#[error( "Selector {selector} matches {count} components in {module}" )]
	AmbiguousSelector { selector: String, module: String, count: usize },
}

/// Finds the component factory registered under `selector` in `module`.
///
/// Matches by exact equality of the public selector string and demands exactly
/// one match. On failure the caller must destroy the now-orphaned module
/// instance before propagating - a failed resolution must not leak it.
///
/// # Errors
/// [`ResolveError::ComponentNotFound`] on zero matches,
/// [`ResolveError::AmbiguousSelector`] on more than one.
pub fn resolve<'module>(
	module: &'module ModuleInstance,
	selector: &str,
) -> Result<&'module ComponentFactory, ResolveError> {
	module.components()
		.iter()
		.filter(| factory | factory.selector() == selector )
		.exactly_one()
		.map_err(| matches | match matches.count() {
			0 => ResolveError::ComponentNotFound {
				selector: selector.to_string(),
				module: module.name().to_string(),
			},
			count => ResolveError::AmbiguousSelector {
				selector: selector.to_string(),
				module: module.name().to_string(),
				count,
			},
		})
}
