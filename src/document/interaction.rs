use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationArgs {
    pub choices: ChoicesArg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicesArg {
    pub value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerGroup {
    pub outcome: Outcome,
    pub rule_specs: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub inputs: RuleInputs,
    pub rule_type: RuleType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInputs {
    pub x: usize,
}

// The widget classifies a learner's answer with a single rule kind; anything
// beyond equality matching belongs to a different interaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleType {
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub dest: String,
    pub feedback: Vec<String>,
    pub param_changes: Vec<serde_json::Value>,
}

impl CustomizationArgs {
    pub fn with_choices(choices: Vec<String>) -> Self {
        Self {
            choices: ChoicesArg { value: choices },
        }
    }
}

impl AnswerGroup {
    pub fn for_choice(dest: String, choice_index: usize) -> Self {
        Self {
            outcome: Outcome {
                dest,
                feedback: vec![String::new()],
                param_changes: Vec::new(),
            },
            rule_specs: vec![RuleSpec::equals(choice_index)],
        }
    }
}

impl RuleSpec {
    pub fn equals(choice_index: usize) -> Self {
        Self {
            inputs: RuleInputs { x: choice_index },
            rule_type: RuleType::Equals,
        }
    }
}

impl Outcome {
    // Only feedback[0] is ever shown.
    pub fn ensure_feedback(&mut self) {
        if self.feedback.is_empty() {
            self.feedback.push(String::new());
        }
    }

    pub fn set_feedback(&mut self, text: String) {
        if self.feedback.is_empty() {
            self.feedback.push(text);
        } else {
            self.feedback[0] = text;
        }
    }
}
