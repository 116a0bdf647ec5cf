//! Prompt construction for the generation pipeline.
//!
//! Each function deterministically renders a natural-language instruction
//! from structured inputs, embedding the output-format contract in the
//! instruction text itself. Inputs are interpolated verbatim; an empty
//! answer list or transcript still produces a well-formed prompt.

use super::quiz::{Answer, ConversationMessage};

/// Renders a transcript as `role: content` lines.
fn render_transcript(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders quiz answers as a numbered `question: answer` list.
fn render_answers(answers: &[Answer]) -> String {
    answers
        .iter()
        .enumerate()
        .map(|(index, answer)| format!("{}. {}: {}", index + 1, answer.question, answer.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the prompt demanding exactly one short follow-up question.
///
/// The tone directive and the "nothing but the question" instruction keep
/// the completion usable as a raw string without post-processing.
pub fn next_question_prompt(history: &[ConversationMessage], question_count: u32) -> String {
    format!(
        "You are an AI conducting a technology personality assessment conversation. \n\
The goal is to understand the user's relationship with technology.\n\
You have asked {question_count} questions so far.\n\
\n\
Previous conversation:\n\
{transcript}\n\
\n\
Generate ONE engaging question that will help build the user's technotype profile. \n\
The question should be:\n\
- Concise and easy to answer (1-2 sentences max)\n\
- Relevant to the conversation so far\n\
- Thought-provoking but not too complex\n\
- Have a stoic, logical, slightly robotic tone\n\
- Focused on technology habits, preferences, or feelings\n\
\n\
Respond with ONLY the next question, and nothing else. Do not include any commentary, \
analysis, or extra lines. Just the question.",
        transcript = render_transcript(history),
    )
}

/// Builds the classification prompt for a completed forced-choice quiz.
pub fn quiz_classification_prompt(answers: &[Answer]) -> String {
    format!(
        "Based on the following quiz answers, generate a technotype personality profile:\n\
\n\
Quiz Answers:\n\
{answers}\n\
\n\
Generate a technotype result with:\n\
1. A technotype name (e.g., \"Digital Nomad\", \"Tech Traditionalist\", \"Cyber Explorer\")\n\
2. A detailed description of this technotype (2-3 paragraphs)\n\
\n\
Format your response as JSON:\n\
{{\n\
  \"technotype\": \"Technotype Name\",\n\
  \"description\": \"Detailed description...\"\n\
}}",
        answers = render_answers(answers),
    )
}

/// Builds the classification prompt for a conversational quiz.
///
/// Also requests a one-sentence `summary` for use as a subtitle.
pub fn conversation_classification_prompt(history: &[ConversationMessage]) -> String {
    format!(
        "Based on the following conversation, generate a technotype personality profile:\n\
\n\
Conversation:\n\
{transcript}\n\
\n\
Generate a technotype result with:\n\
1. A technotype name (e.g., \"Digital Nomad\", \"Tech Traditionalist\", \"Cyber Explorer\")\n\
2. A detailed description of this technotype (2-3 paragraphs)\n\
3. A brief, engaging, one-sentence summary of the technotype for use as a subtitle\n\
\n\
Format your response as JSON:\n\
{{\n\
  \"technotype\": \"Technotype Name\",\n\
  \"description\": \"Detailed description...\",\n\
  \"summary\": \"One-sentence summary...\"\n\
}}",
        transcript = render_transcript(history),
    )
}

/// Builds the prompt for the 8-item personalized skill-tree attributes.
pub fn attributes_prompt(technotype: &str, technotype_summary: &str) -> String {
    format!(
        "Based on the user's technotype profile, generate 8 personalized digital wellbeing \
attributes for their skill tree.\n\
\n\
User's Technotype: {technotype}\n\
Technotype Summary: {technotype_summary}\n\
\n\
Generate 8 attributes that are:\n\
1. Specific to this user's technotype and behavior patterns\n\
2. Actionable and practical\n\
3. Concise (2-4 words for title, 1 sentence for suggestion)\n\
4. Relevant to digital wellbeing and technology habits\n\
\n\
Format your response as JSON:\n\
{{\n\
  \"attributes\": [\n\
    {{\n\
      \"title\": \"Attribute Name\",\n\
      \"suggestion\": \"One concise, actionable suggestion for this user\"\n\
    }}\n\
  ]\n\
}}\n\
\n\
Make the attributes highly personalized based on their technotype. For example:\n\
- If they're a \"Digital Nomad\", focus on work-life balance and productivity\n\
- If they're a \"Tech Traditionalist\", focus on gradual digital adoption\n\
- If they're a \"Cyber Explorer\", focus on mindful exploration and boundaries\n\
\n\
Each attribute should be a specific skill or habit that would benefit this particular user type."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::MessageRole;

    #[test]
    fn next_question_prompt_includes_count_and_transcript() {
        let history = vec![
            ConversationMessage::assistant("How do you feel about notifications?"),
            ConversationMessage::user("They stress me out."),
        ];
        let prompt = next_question_prompt(&history, 1);

        assert!(prompt.contains("You have asked 1 questions so far."));
        assert!(prompt.contains("assistant: How do you feel about notifications?"));
        assert!(prompt.contains("user: They stress me out."));
        assert!(prompt.contains("Respond with ONLY the next question"));
    }

    #[test]
    fn next_question_prompt_with_empty_history_is_well_formed() {
        let prompt = next_question_prompt(&[], 0);
        assert!(prompt.contains("You have asked 0 questions so far."));
        assert!(prompt.contains("Previous conversation:\n\n"));
    }

    #[test]
    fn quiz_prompt_numbers_answers() {
        let answers = vec![
            Answer::new("Q1", "A1"),
            Answer::new("Q2", "A2"),
        ];
        let prompt = quiz_classification_prompt(&answers);

        assert!(prompt.contains("1. Q1: A1"));
        assert!(prompt.contains("2. Q2: A2"));
        assert!(prompt.contains("Format your response as JSON:"));
        assert!(prompt.contains("\"technotype\": \"Technotype Name\""));
    }

    #[test]
    fn quiz_prompt_with_no_answers_is_well_formed() {
        let prompt = quiz_classification_prompt(&[]);
        assert!(prompt.contains("Quiz Answers:\n\n"));
    }

    #[test]
    fn conversation_prompt_requests_summary_field() {
        let history = vec![ConversationMessage::new(MessageRole::User, "hello")];
        let prompt = conversation_classification_prompt(&history);

        assert!(prompt.contains("user: hello"));
        assert!(prompt.contains("one-sentence summary"));
        assert!(prompt.contains("\"summary\": \"One-sentence summary...\""));
    }

    #[test]
    fn attributes_prompt_interpolates_profile() {
        let prompt = attributes_prompt("Digital Nomad", "Always on the move.");
        assert!(prompt.contains("User's Technotype: Digital Nomad"));
        assert!(prompt.contains("Technotype Summary: Always on the move."));
        assert!(prompt.contains("generate 8 personalized digital wellbeing"));
    }

    #[test]
    fn answers_are_interpolated_verbatim() {
        // No validation or escaping of input content.
        let answers = vec![Answer::new("Q: with {braces}", "A: \"quoted\"")];
        let prompt = quiz_classification_prompt(&answers);
        assert!(prompt.contains("1. Q: with {braces}: A: \"quoted\""));
    }
}
