//! Prompt template for the IT support chatbot

use itbot_core::{Error, Result};

const CONTEXT_PLACEHOLDER: &str = "{context}";
const QUESTION_PLACEHOLDER: &str = "{question}";

/// Built-in IT support prompt.
pub const IT_SUPPORT_TEMPLATE: &str = "You are an IT support chatbot. If the user greets you, respond politely and let them know you are here to assist with IT support questions.
If they ask a question about the IT sector, use the following context to answer the question.
If the question is out of context, respond politely that you are an IT support chatbot and can only assist with IT-related questions.
If you don't know the answer, just say you don't know.
You should respond with short and concise answers, no longer than 2 sentences.

Context: {context}
Question: {question}
Answer:";

/// A prompt with `{context}` and `{question}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Use a custom template. Both placeholders must be present.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        for placeholder in [CONTEXT_PLACEHOLDER, QUESTION_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(Error::Configuration(format!(
                    "prompt template is missing the {} placeholder",
                    placeholder
                )));
            }
        }
        Ok(Self { template })
    }

    /// The built-in IT support template
    pub fn it_support() -> Self {
        Self {
            template: IT_SUPPORT_TEMPLATE.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute context and question in a single pass. Placeholder text
    /// inside the substituted values is left as is.
    pub fn render(&self, context: &str, question: &str) -> String {
        let mut prompt = String::with_capacity(self.template.len() + context.len() + question.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            prompt.push_str(&rest[..open]);
            let tail = &rest[open..];

            if let Some(after) = tail.strip_prefix(CONTEXT_PLACEHOLDER) {
                prompt.push_str(context);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(QUESTION_PLACEHOLDER) {
                prompt.push_str(question);
                rest = after;
            } else {
                prompt.push('{');
                rest = &tail[1..];
            }
        }

        prompt.push_str(rest);
        prompt
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::it_support()
    }
}
