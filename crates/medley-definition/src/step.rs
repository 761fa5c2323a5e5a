use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::template::FormTemplateRef;

/// One unit of work in a workflow definition, tagged by the registry's
/// `type` field.
///
/// Only the shapes that carry nested children or feed dependency
/// extraction are modeled. Every other step type deserializes into
/// [`StepNode::Other`] and is treated as a leaf with no downstream
/// dependency. Children are held by value, so the structure is a tree;
/// there is no back-reference mechanism and cycles cannot occur.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StepNode {
  /// Leaf step executed by a registered task definition.
  #[serde(rename = "SIMPLE")]
  Simple {
    #[serde(default)]
    name: Option<String>,
  },

  /// Human-interaction step, possibly referencing a form template.
  #[serde(rename = "HUMAN")]
  Human {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "inputParameters")]
    input_parameters: Value,
  },

  /// Branching step: case-label to branch, plus an optional default.
  #[serde(rename = "SWITCH", alias = "DECISION")]
  Branch {
    #[serde(default, rename = "decisionCases")]
    decision_cases: BTreeMap<String, BranchBody>,
    #[serde(default, rename = "defaultCase")]
    default_case: BranchBody,
  },

  /// Parallel fork over an ordered list of branches.
  #[serde(rename = "FORK_JOIN")]
  Fork {
    #[serde(default, rename = "forkTasks")]
    fork_tasks: Vec<BranchBody>,
  },

  /// Any other step type: leaf, no modeled dependency.
  #[serde(untagged)]
  Other(Value),
}

/// One branch body: a SWITCH case, the default case, or a fork arm.
///
/// A body that is not an array is tolerated and traversed as empty, so
/// one malformed case cannot hide its well-formed siblings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BranchBody {
  Steps(Vec<Option<StepNode>>),
  Other(Value),
}

impl BranchBody {
  pub fn steps(&self) -> Option<&[Option<StepNode>]> {
    match self {
      BranchBody::Steps(steps) => Some(steps),
      BranchBody::Other(_) => None,
    }
  }
}

impl Default for BranchBody {
  fn default() -> Self {
    BranchBody::Steps(Vec::new())
  }
}

impl StepNode {
  /// Child branches in traversal order: decision cases in key order, then
  /// the default branch, then fork branches in declared order. Leaves
  /// return nothing.
  pub fn child_branches(&self) -> Vec<&[Option<StepNode>]> {
    match self {
      StepNode::Branch {
        decision_cases,
        default_case,
      } => decision_cases
        .values()
        .chain(std::iter::once(default_case))
        .filter_map(BranchBody::steps)
        .collect(),
      StepNode::Fork { fork_tasks } => fork_tasks.iter().filter_map(BranchBody::steps).collect(),
      _ => Vec::new(),
    }
  }

  /// Trimmed task-definition name of a SIMPLE step.
  ///
  /// Missing or blank names yield `None`; a nameless step contributes no
  /// dependency rather than failing the run.
  pub fn simple_name(&self) -> Option<&str> {
    let StepNode::Simple { name } = self else {
      return None;
    };
    let name = name.as_deref()?.trim();
    (!name.is_empty()).then_some(name)
  }

  /// Form template reference of a HUMAN step, if present and well-formed
  /// (string name, integral version).
  ///
  /// The reference lives at
  /// `inputParameters.__humanTaskDefinition.userFormTemplate`; any missing
  /// or wrong-shaped layer yields `None`. Absence of the reference is a
  /// valid state, not an error.
  pub fn form_template(&self) -> Option<FormTemplateRef> {
    let StepNode::Human {
      input_parameters, ..
    } = self
    else {
      return None;
    };

    let template = input_parameters
      .get("__humanTaskDefinition")?
      .get("userFormTemplate")?;

    let name = template.get("name")?.as_str()?.trim();
    let version = template.get("version")?.as_i64()?;
    if name.is_empty() {
      return None;
    }

    Some(FormTemplateRef::new(name, version))
  }
}
