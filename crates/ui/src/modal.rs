use crate::view::Element;

/// A yes/no select inside a modal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<(&'static str, &'static str)>,
}

/// Dialog holding a single form. The view owns the modal slot; closing it
/// removes whatever modal is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: &'static str,
    pub form: Element,
    pub fields: Vec<ModalField>,
    pub submit_label: &'static str,
}

const YES_NO: [(&str, &str); 2] = [("yes", "Yes"), ("no", "No")];

impl Modal {
    pub fn eligibility_checker() -> Self {
        Self {
            title: "Eligibility Checker",
            form: Element::EligibilityForm,
            fields: vec![
                ModalField {
                    name: "health",
                    label: "Are you feeling healthy today?",
                    options: YES_NO.to_vec(),
                },
                ModalField {
                    name: "lastDonation",
                    label: "Have you donated blood in the last 3 months?",
                    options: YES_NO.to_vec(),
                },
            ],
            submit_label: "Check Eligibility",
        }
    }
}
