use super::variables::VariableId;
use crate::basic_types::ModelError;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::partcp_assert_moderate;

/// The names of the variables in a store. Anonymous variables receive the name `_<index>`, which
/// is displayed but cannot be looked up.
#[derive(Clone, Debug, Default)]
pub(crate) struct VariableNames {
    names: KeyedVec<VariableId, String>,
    variable_by_name: HashMap<String, VariableId>,
}

impl VariableNames {
    /// Fails if `name` is already in use by another variable, or if it could be confused with
    /// the name of an anonymous variable.
    pub(crate) fn check_available(&self, name: &str) -> Result<(), ModelError> {
        if is_anonymous_name(name) {
            Err(ModelError::ReservedVariableName(name.to_owned()))
        } else if self.variable_by_name.contains_key(name) {
            Err(ModelError::DuplicateVariableName(name.to_owned()))
        } else {
            Ok(())
        }
    }

    /// Registers the name of the variable which was created last.
    pub(crate) fn add(&mut self, variable: VariableId, name: Option<String>) {
        let name = match name {
            Some(name) => {
                let _ = self.variable_by_name.insert(name.clone(), variable);
                name
            }
            None => format!("_{}", self.names.len()),
        };

        let added = self.names.push(name);
        partcp_assert_moderate!(added == variable);
    }

    pub(crate) fn name(&self, variable: VariableId) -> &str {
        &self.names[variable]
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<VariableId> {
        self.variable_by_name.get(name).copied()
    }
}

fn is_anonymous_name(name: &str) -> bool {
    name.strip_prefix('_')
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|byte| byte.is_ascii_digit()))
}
