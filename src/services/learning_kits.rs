use crate::schemas::resource::{ResourceBody, ResourceExample};

/// Family of example resources for one difficulty level.
pub(crate) trait LearningKit: Send + Sync {
    fn level(&self) -> &'static str;
    fn code_example(&self) -> ResourceExample;
    fn quiz(&self) -> ResourceExample;
}

pub(crate) struct BeginnerKit;

pub(crate) struct AdvancedKit;

impl LearningKit for BeginnerKit {
    fn level(&self) -> &'static str {
        "beginner"
    }

    fn code_example(&self) -> ResourceExample {
        example(
            "Hello World",
            self.level(),
            "Basic example",
            ResourceBody::CodeExample { code: "print('Hello, Python!')".to_string() },
        )
    }

    fn quiz(&self) -> ResourceExample {
        example(
            "Exponentiation",
            self.level(),
            "Operator warm-up",
            ResourceBody::Quiz {
                question: "What does print(2**3) output?".to_string(),
                answer: "8".to_string(),
            },
        )
    }
}

impl LearningKit for AdvancedKit {
    fn level(&self) -> &'static str {
        "advanced"
    }

    fn code_example(&self) -> ResourceExample {
        example(
            "List Comprehension",
            self.level(),
            "More involved example",
            ResourceBody::CodeExample { code: "[x**2 for x in range(5)]".to_string() },
        )
    }

    fn quiz(&self) -> ResourceExample {
        example(
            "Decorators",
            self.level(),
            "Language features",
            ResourceBody::Quiz {
                question: "What is @staticmethod?".to_string(),
                answer: "A decorator for class-level methods".to_string(),
            },
        )
    }
}

pub(crate) fn kit_for_level(level: &str) -> Option<&'static dyn LearningKit> {
    match level {
        "beginner" => Some(&BeginnerKit),
        "advanced" => Some(&AdvancedKit),
        _ => None,
    }
}

/// Builds the example of `kind` (`CodeExample` or `Quiz`) from the kit for `level`.
pub(crate) fn example_for(kind: &str, level: &str) -> Option<ResourceExample> {
    let kit = kit_for_level(level)?;
    match kind {
        "CodeExample" => Some(kit.code_example()),
        "Quiz" => Some(kit.quiz()),
        _ => None,
    }
}

fn example(title: &str, level: &str, description: &str, body: ResourceBody) -> ResourceExample {
    ResourceExample {
        title: title.to_string(),
        difficulty: level.to_string(),
        description: Some(description.to_string()),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::ResourceKind;

    #[test]
    fn every_kit_produces_both_kinds_at_its_level() {
        for level in ["beginner", "advanced"] {
            let kit = kit_for_level(level).expect("kit");
            let code = kit.code_example();
            let quiz = kit.quiz();

            assert_eq!(code.difficulty, level);
            assert_eq!(quiz.difficulty, level);
            assert_eq!(code.body.kind(), ResourceKind::CodeExample);
            assert_eq!(quiz.body.kind(), ResourceKind::Quiz);
        }
    }

    #[test]
    fn beginner_quiz_asks_about_exponentiation() {
        let quiz = example_for("Quiz", "beginner").expect("quiz");
        assert_eq!(quiz.title, "Exponentiation");
        assert!(matches!(quiz.body, ResourceBody::Quiz { ref answer, .. } if answer == "8"));
    }

    #[test]
    fn unknown_kind_or_level_yields_nothing() {
        assert!(example_for("Video", "beginner").is_none());
        assert!(example_for("CodeExample", "expert").is_none());
        assert!(example_for("quiz", "advanced").is_none());
    }
}
