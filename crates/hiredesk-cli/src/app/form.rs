//! Create / edit candidate form state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hiredesk_core::{
  candidate::{Candidate, Form, JobOffer},
  draft::CandidateDraft,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
  FirstName,
  LastName,
  Email,
  Phone,
  JobOffer,
  Form,
  Notes,
}

impl FormField {
  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "First name *",
      Self::LastName => "Last name *",
      Self::Email => "Email *",
      Self::Phone => "Phone",
      Self::JobOffer => "Job offer",
      Self::Form => "Form",
      Self::Notes => "Notes",
    }
  }

  /// Pickers cycle through a list instead of accepting text.
  pub fn is_picker(self) -> bool { matches!(self, Self::JobOffer | Self::Form) }
}

const CREATE_FIELDS: &[FormField] = &[
  FormField::FirstName,
  FormField::LastName,
  FormField::Email,
  FormField::Phone,
  FormField::JobOffer,
  FormField::Form,
  FormField::Notes,
];

// Updates never re-link the application form, so editing does not offer it.
const EDIT_FIELDS: &[FormField] = &[
  FormField::FirstName,
  FormField::LastName,
  FormField::Email,
  FormField::Phone,
  FormField::JobOffer,
  FormField::Notes,
];

/// What the screen should do after a key press in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
  Continue,
  Submit,
  Cancel,
}

#[derive(Debug, Clone)]
pub struct CandidateForm {
  pub mode:  FormMode,
  pub draft: CandidateDraft,
  pub focus: FormField,
}

impl CandidateForm {
  pub fn create() -> Self {
    Self {
      mode:  FormMode::Create,
      draft: CandidateDraft::default(),
      focus: FormField::FirstName,
    }
  }

  pub fn edit(candidate: &Candidate) -> Self {
    Self {
      mode:  FormMode::Edit(candidate.id),
      draft: CandidateDraft::from_candidate(candidate),
      focus: FormField::FirstName,
    }
  }

  pub fn title(&self) -> &'static str {
    match self.mode {
      FormMode::Create => "New candidate",
      FormMode::Edit(_) => "Edit candidate",
    }
  }

  pub fn fields(&self) -> &'static [FormField] {
    match self.mode {
      FormMode::Create => CREATE_FIELDS,
      FormMode::Edit(_) => EDIT_FIELDS,
    }
  }

  fn focus_index(&self) -> usize {
    self
      .fields()
      .iter()
      .position(|f| *f == self.focus)
      .unwrap_or(0)
  }

  pub fn focus_next(&mut self) {
    let fields = self.fields();
    self.focus = fields[(self.focus_index() + 1) % fields.len()];
  }

  pub fn focus_prev(&mut self) {
    let fields = self.fields();
    self.focus = fields[(self.focus_index() + fields.len() - 1) % fields.len()];
  }

  fn text_mut(&mut self) -> Option<&mut String> {
    let d = &mut self.draft;
    match self.focus {
      FormField::FirstName => Some(&mut d.first_name),
      FormField::LastName => Some(&mut d.last_name),
      FormField::Email => Some(&mut d.email),
      FormField::Phone => Some(&mut d.phone),
      FormField::Notes => Some(&mut d.notes),
      FormField::JobOffer | FormField::Form => None,
    }
  }

  /// Text currently shown for `field`.
  pub fn display_value(&self, field: FormField, offers: &[JobOffer], forms: &[Form]) -> String {
    let d = &self.draft;
    match field {
      FormField::FirstName => d.first_name.clone(),
      FormField::LastName => d.last_name.clone(),
      FormField::Email => d.email.clone(),
      FormField::Phone => d.phone.clone(),
      FormField::Notes => d.notes.clone(),
      FormField::JobOffer => picker_label(d.job_offer_id, offers.iter().map(|o| (o.id, &o.title))),
      FormField::Form => picker_label(d.form_id, forms.iter().map(|f| (f.id, &f.name))),
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent, offers: &[JobOffer], forms: &[Form]) -> FormKey {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
      return FormKey::Submit;
    }
    match key.code {
      KeyCode::Esc => return FormKey::Cancel,
      KeyCode::Enter => {
        if self.focus == *self.fields().last().unwrap_or(&FormField::Notes) {
          return FormKey::Submit;
        }
        self.focus_next();
      }
      KeyCode::Tab | KeyCode::Down => self.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
      KeyCode::Left | KeyCode::Right if self.focus.is_picker() => {
        let forward = key.code == KeyCode::Right;
        match self.focus {
          FormField::JobOffer => {
            self.draft.job_offer_id =
              cycle(self.draft.job_offer_id, offers.iter().map(|o| o.id), forward);
          }
          FormField::Form => {
            self.draft.form_id = cycle(self.draft.form_id, forms.iter().map(|f| f.id), forward);
          }
          _ => {}
        }
      }
      KeyCode::Backspace => {
        if let Some(text) = self.text_mut() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.text_mut() {
          text.push(c);
        }
      }
      _ => {}
    }
    FormKey::Continue
  }
}

/// Step through `None` followed by every id, wrapping around.
fn cycle(current: Option<i64>, ids: impl Iterator<Item = i64>, forward: bool) -> Option<i64> {
  let options: Vec<Option<i64>> = std::iter::once(None).chain(ids.map(Some)).collect();
  let i = options.iter().position(|o| *o == current).unwrap_or(0);
  let next = if forward {
    (i + 1) % options.len()
  } else {
    (i + options.len() - 1) % options.len()
  };
  options[next]
}

fn picker_label<'a>(selected: Option<i64>, mut items: impl Iterator<Item = (i64, &'a String)>) -> String {
  match selected {
    None => "None".to_string(),
    Some(id) => items
      .find(|(item_id, _)| *item_id == id)
      .map(|(_, label)| label.clone())
      .unwrap_or_else(|| format!("#{id}")),
  }
}
