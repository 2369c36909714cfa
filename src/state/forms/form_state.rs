//! Form state management and form structs

use super::field::FormField;
use crate::state::{NewUser, Portfolio, PortfolioDraft, Question, QuestionDraft, Role};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Admin sign-in form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
    /// Set while the login request is running
    pub pending: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("Email"),
            password: FormField::secret("Password"),
            active_field_index: 0,
            pending: false,
        }
    }

    /// Both fields filled in
    pub fn is_complete(&self) -> bool {
        !self.email.is_blank() && !self.password.as_text().is_empty()
    }

    /// Forget the typed password, keep the email for the next attempt
    pub fn clear_password(&mut self) {
        self.password.clear();
        self.active_field_index = 1;
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

/// Server call an editor turns into
#[derive(Debug, Clone, PartialEq)]
pub enum EditorSave {
    CreatePortfolio(PortfolioDraft),
    UpdatePortfolio(String, PortfolioDraft),
    CreateQuestion(QuestionDraft),
    UpdateQuestion(String, QuestionDraft),
    CreateUser(NewUser),
}

/// Builder editor currently open
#[derive(Debug, Clone)]
pub enum EditorForm {
    Portfolio(PortfolioForm),
    Question(QuestionForm),
    User(UserForm),
}

impl EditorForm {
    pub fn title(&self) -> &'static str {
        match self {
            EditorForm::Portfolio(f) if f.editing.is_some() => "Edit portfolio",
            EditorForm::Portfolio(_) => "New portfolio",
            EditorForm::Question(f) if f.editing.is_some() => "Edit question",
            EditorForm::Question(_) => "New question",
            EditorForm::User(_) => "New user",
        }
    }

    fn form(&self) -> &dyn Form {
        match self {
            EditorForm::Portfolio(f) => f,
            EditorForm::Question(f) => f,
            EditorForm::User(f) => f,
        }
    }

    fn form_mut(&mut self) -> &mut dyn Form {
        match self {
            EditorForm::Portfolio(f) => f,
            EditorForm::Question(f) => f,
            EditorForm::User(f) => f,
        }
    }

    /// Validated request for the record being edited
    pub fn save_request(&self) -> Result<EditorSave, String> {
        Ok(match self {
            EditorForm::Portfolio(f) => match &f.editing {
                Some(id) => EditorSave::UpdatePortfolio(id.clone(), f.draft()?),
                None => EditorSave::CreatePortfolio(f.draft()?),
            },
            EditorForm::Question(f) => match &f.editing {
                Some(id) => EditorSave::UpdateQuestion(id.clone(), f.draft()?),
                None => EditorSave::CreateQuestion(f.draft()?),
            },
            EditorForm::User(f) => EditorSave::CreateUser(f.draft()?),
        })
    }

    pub fn fields(&self) -> Vec<&FormField> {
        let form = self.form();
        (0..form.field_count())
            .filter_map(|i| form.get_field(i))
            .collect()
    }

    pub fn active_field(&self) -> usize {
        self.form().active_field()
    }

    pub fn is_last_field(&self) -> bool {
        let form = self.form();
        form.active_field() + 1 == form.field_count()
    }

    pub fn next_field(&mut self) {
        self.form_mut().next_field();
    }

    pub fn prev_field(&mut self) {
        self.form_mut().prev_field();
    }

    pub fn input_char(&mut self, c: char) {
        self.form_mut().get_active_field_mut().push_char(c);
    }

    pub fn backspace(&mut self) {
        self.form_mut().get_active_field_mut().pop_char();
    }
}

/// Lowercase with whitespace runs turned into dashes
fn normalize_slug(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Portfolio create/edit form
#[derive(Debug, Clone)]
pub struct PortfolioForm {
    /// Id of the portfolio being edited; `None` creates a new one
    pub editing: Option<String>,
    pub title: FormField,
    pub description: FormField,
    pub slug: FormField,
    pub thumbnail: FormField,
    pub order: FormField,
    pub is_active: FormField,
    pub active_field_index: usize,
}

impl PortfolioForm {
    pub fn new() -> Self {
        Self {
            editing: None,
            title: FormField::text("Title"),
            description: FormField::text("Description"),
            slug: FormField::text("Slug (URL path)"),
            thumbnail: FormField::text("Thumbnail URL (optional)"),
            order: FormField::number("Order", 0),
            is_active: FormField::flag("Active", true),
            active_field_index: 0,
        }
    }

    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let base = Self::new();
        Self {
            editing: Some(portfolio.id.clone()),
            title: base.title.with_value(portfolio.title.as_str()),
            description: base.description.with_value(portfolio.description.as_str()),
            slug: base.slug.with_value(portfolio.slug.as_str()),
            thumbnail: base
                .thumbnail
                .with_value(portfolio.thumbnail.clone().unwrap_or_default()),
            order: FormField::number("Order", i64::from(portfolio.order)),
            is_active: FormField::flag("Active", portfolio.is_active),
            active_field_index: 0,
        }
    }

    /// Request body, or the message explaining what is missing
    pub fn draft(&self) -> Result<PortfolioDraft, String> {
        if self.title.is_blank() {
            return Err("Title is required.".to_string());
        }
        let slug = normalize_slug(self.slug.as_text());
        if slug.is_empty() {
            return Err("Slug is required.".to_string());
        }
        let order = self
            .order
            .as_number()
            .ok_or_else(|| "Order must be a whole number.".to_string())?;

        Ok(PortfolioDraft {
            title: self.title.as_text().trim().to_string(),
            description: self.description.as_text().trim().to_string(),
            slug,
            thumbnail: self.thumbnail.optional(),
            is_active: self.is_active.is_on(),
            order,
        })
    }
}

impl Default for PortfolioForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PortfolioForm {
    fn field_count(&self) -> usize {
        6
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(5);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.title,
            1 => &mut self.description,
            2 => &mut self.slug,
            3 => &mut self.thumbnail,
            4 => &mut self.order,
            _ => &mut self.is_active,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.title),
            1 => Some(&self.description),
            2 => Some(&self.slug),
            3 => Some(&self.thumbnail),
            4 => Some(&self.order),
            5 => Some(&self.is_active),
            _ => None,
        }
    }
}

/// Question create/edit form, always bound to one portfolio
#[derive(Debug, Clone)]
pub struct QuestionForm {
    pub editing: Option<String>,
    pub portfolio_id: String,
    pub step: FormField,
    pub order: FormField,
    pub title: FormField,
    pub description: FormField,
    pub thumbnail: FormField,
    pub min_length: FormField,
    pub is_required: FormField,
    pub active_field_index: usize,
}

impl QuestionForm {
    /// Blank question: step 1, ten characters suggested, required
    pub fn new(portfolio_id: &str) -> Self {
        Self {
            editing: None,
            portfolio_id: portfolio_id.to_string(),
            step: FormField::number("Step", 1),
            order: FormField::number("Order", 0),
            title: FormField::text("Question"),
            description: FormField::text("Description (optional)"),
            thumbnail: FormField::text("Thumbnail URL (optional)"),
            min_length: FormField::number("Minimum length", 10),
            is_required: FormField::flag("Required", true),
            active_field_index: 0,
        }
    }

    pub fn from_question(question: &Question, portfolio_id: &str) -> Self {
        let base = Self::new(question.portfolio_id.as_deref().unwrap_or(portfolio_id));
        Self {
            editing: Some(question.id.clone()),
            step: FormField::number("Step", i64::from(question.step)),
            order: FormField::number("Order", i64::from(question.order)),
            title: base.title.clone().with_value(question.title.as_str()),
            description: base
                .description
                .clone()
                .with_value(question.description.clone().unwrap_or_default()),
            thumbnail: base
                .thumbnail
                .clone()
                .with_value(question.thumbnail.clone().unwrap_or_default()),
            min_length: FormField::number("Minimum length", i64::from(question.min_length)),
            is_required: FormField::flag("Required", question.is_required),
            ..base
        }
    }

    pub fn draft(&self) -> Result<QuestionDraft, String> {
        let step = self
            .step
            .as_number::<u32>()
            .filter(|s| *s >= 1)
            .ok_or_else(|| "Step must be 1 or more.".to_string())?;
        let order = self
            .order
            .as_number()
            .ok_or_else(|| "Order must be a whole number.".to_string())?;
        if self.title.is_blank() {
            return Err("Question text is required.".to_string());
        }
        let min_length = self
            .min_length
            .as_number()
            .ok_or_else(|| "Minimum length must be a whole number.".to_string())?;

        Ok(QuestionDraft {
            portfolio_id: self.portfolio_id.clone(),
            step,
            title: self.title.as_text().trim().to_string(),
            description: self.description.optional(),
            thumbnail: self.thumbnail.optional(),
            min_length,
            order,
            is_required: self.is_required.is_on(),
        })
    }
}

impl Form for QuestionForm {
    fn field_count(&self) -> usize {
        7
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(6);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.step,
            1 => &mut self.order,
            2 => &mut self.title,
            3 => &mut self.description,
            4 => &mut self.thumbnail,
            5 => &mut self.min_length,
            _ => &mut self.is_required,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.step),
            1 => Some(&self.order),
            2 => Some(&self.title),
            3 => Some(&self.description),
            4 => Some(&self.thumbnail),
            5 => Some(&self.min_length),
            6 => Some(&self.is_required),
            _ => None,
        }
    }
}

/// New administrator account
#[derive(Debug, Clone)]
pub struct UserForm {
    pub name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub super_admin: FormField,
    pub active_field_index: usize,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("Name"),
            email: FormField::text("Email"),
            password: FormField::secret("Password"),
            super_admin: FormField::flag("Super administrator", false),
            active_field_index: 0,
        }
    }

    pub fn draft(&self) -> Result<NewUser, String> {
        if self.name.is_blank() || self.email.is_blank() || self.password.as_text().is_empty() {
            return Err("Name, email and password are required.".to_string());
        }
        let role = if self.super_admin.is_on() {
            Role::SuperAdmin
        } else {
            Role::Admin
        };
        Ok(NewUser {
            email: self.email.as_text().trim().to_string(),
            password: self.password.as_text().to_string(),
            name: self.name.as_text().trim().to_string(),
            role,
        })
    }
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for UserForm {
    fn field_count(&self) -> usize {
        4
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.password,
            _ => &mut self.super_admin,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.password),
            3 => Some(&self.super_admin),
            _ => None,
        }
    }
}
