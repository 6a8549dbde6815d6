//! Tests for formgen-model types.

use std::collections::BTreeMap;

use serde_json::json;

use formgen_model::{
    AnswerOption, Form, HideExpression, Page, Question, QuestionOptions, Section,
    TranslationTable,
};

fn sample_form() -> Form {
    Form {
        name: "Antenatal".to_string(),
        description: "MSF Form - Antenatal".to_string(),
        version: "1".to_string(),
        published: true,
        uuid: String::new(),
        processor: "EncounterFormProcessor".to_string(),
        encounter: "Consultation".to_string(),
        retired: false,
        referenced_forms: vec![],
        pages: vec![Page {
            label: "History".to_string(),
            sections: vec![Section {
                label: "Pregnancy".to_string(),
                is_expanded: false,
                questions: vec![Question {
                    id: "numberOfFetuses".to_string(),
                    label: "Number of fetuses".to_string(),
                    question_type: Some("obs".to_string()),
                    required: true,
                    inline_multi_checkbox: None,
                    value: None,
                    question_options: QuestionOptions {
                        rendering: "radio".to_string(),
                        concept: Some("numberOfFetuses".to_string()),
                        answers: Some(vec![
                            AnswerOption {
                                label: "1".to_string(),
                                concept: "1".to_string(),
                                translations: BTreeMap::new(),
                            },
                            AnswerOption {
                                label: "2".to_string(),
                                concept: "2".to_string(),
                                translations: BTreeMap::new(),
                            },
                        ]),
                        ..QuestionOptions::default()
                    },
                    validators: None,
                    default: None,
                    question_info: None,
                    hide: Some(HideExpression {
                        hide_when_expression: "pregnancyConfirmed !== 'Yes'".to_string(),
                    }),
                    original_label: "Number of fetuses".to_string(),
                }],
            }],
        }],
    }
}

#[test]
fn form_serializes_to_engine_contract() {
    let value = serde_json::to_value(sample_form()).expect("serialize form");
    assert_eq!(
        value,
        json!({
            "name": "Antenatal",
            "description": "MSF Form - Antenatal",
            "version": "1",
            "published": true,
            "uuid": "",
            "processor": "EncounterFormProcessor",
            "encounter": "Consultation",
            "retired": false,
            "referencedForms": [],
            "pages": [{
                "label": "History",
                "sections": [{
                    "label": "Pregnancy",
                    "isExpanded": false,
                    "questions": [{
                        "id": "numberOfFetuses",
                        "label": "Number of fetuses",
                        "type": "obs",
                        "required": true,
                        "questionOptions": {
                            "rendering": "radio",
                            "concept": "numberOfFetuses",
                            "answers": [
                                {"label": "1", "concept": "1"},
                                {"label": "2", "concept": "2"}
                            ]
                        },
                        "hide": {
                            "hideWhenExpression": "pregnancyConfirmed !== 'Yes'"
                        }
                    }]
                }]
            }]
        })
    );
}

#[test]
fn form_round_trips() {
    let form = sample_form();
    let json = serde_json::to_string(&form).expect("serialize form");
    let round: Form = serde_json::from_str(&json).expect("deserialize form");
    assert_eq!(round.name, "Antenatal");
    assert_eq!(round.question_count(), 1);
    assert_eq!(round.answer_count(), 2);
}

#[test]
fn translation_table_serializes_sorted() {
    let mut table = TranslationTable::new("Antenatal", "ar");
    table.insert_first("Weight", "الوزن");
    table.insert_first("Age", "العمر");

    let value = serde_json::to_value(&table).expect("serialize table");
    assert_eq!(
        value,
        json!({
            "uuid": "",
            "form": "Antenatal",
            "description": "Ar Translations for 'Antenatal'",
            "language": "ar",
            "translations": {
                "Age": "العمر",
                "Weight": "الوزن"
            }
        })
    );
    let text = serde_json::to_string(&table).expect("serialize table");
    assert!(text.find("Age").expect("Age key") < text.find("Weight").expect("Weight key"));
}
