//! Prompt Builder
//!
//! Pure mapping from a validated selection to the instruction text sent to
//! the generative service. Every business rule the service must follow
//! (difficulty mix, chapter focus, syllabus coverage, language, per-mode
//! structure) is spelled out here.

use crate::core::catalog::Subject;
use crate::core::generation::types::{Difficulty, GenerationMode, Language};
use crate::core::models::{ANSWER_PREFIX, OPTION_IDS};
use crate::core::selection::ValidSelection;

/// Minimum MCQ count at which an unrestricted request must spread across
/// chapters.
pub const SYLLABUS_COVERAGE_MIN_COUNT: u8 = 5;

const SOURCE_INSTRUCTION: &str = "Base the questions on concepts from the NCERT textbook, NCERT Science Exemplar, and past Science Olympiads. However, you MUST create unique, modified questions. DO NOT copy-paste from any source.";

const QUESTION_SETTER_ROLE: &str =
    "You are an expert question paper setter for a prestigious national scholarship exam in India.";

/// Build the instruction text for `selection`.
pub fn build_prompt(selection: &ValidSelection) -> String {
    match selection.mode {
        GenerationMode::Mcq => mcq_prompt(selection),
        GenerationMode::Subjective => subjective_prompt(selection),
        GenerationMode::StudyGuide => study_guide_prompt(selection),
        GenerationMode::ConceptMap => concept_map_prompt(selection),
    }
}

// ============================================================================
// Shared directives
// ============================================================================

/// Difficulty clause for a question set, or `None` when no level was chosen.
fn difficulty_directive(difficulty: Option<Difficulty>) -> Option<String> {
    difficulty.map(|d| {
        if d.is_hybrid() {
            "The complexity of the questions must be a mix across the entire set: approximately 50% Easy, 25% Medium, and 25% Hard.".to_string()
        } else {
            format!("The complexity of all questions must strictly align with the requested '{d}' level.")
        }
    })
}

fn chapter_focus_directive(selection: &ValidSelection) -> Option<String> {
    selection.scope.chapter().map(|chapter| {
        format!(
            "**Chapter Focus:** All questions MUST be strictly based on the chapter: \"{chapter}\" and no other chapter. All other instructions must still be followed."
        )
    })
}

fn syllabus_coverage_directive(selection: &ValidSelection) -> Option<String> {
    let count = selection.question_count;
    if selection.scope.chapter().is_some() || count < SYLLABUS_COVERAGE_MIN_COUNT {
        return None;
    }
    Some(format!(
        "**Syllabus Coverage:** It is crucial that the generated questions cover a wide range of topics. The {count} questions must be sourced from as many different chapters within the CBSE Class 10 {subject} syllabus as practical. Distribute them as evenly as possible, aiming for one question per chapter until the requested count is reached. For example, if generating 5 questions, they should ideally come from 5 distinct chapters.",
        subject = selection.subject,
    ))
}

fn language_line(language: Language, fields: &str) -> String {
    format!("Language: All generated text ({fields}) MUST be in {language}.")
}

fn syllabus_line(subject: Subject) -> String {
    format!("Syllabus: Exclusively the CBSE Class X Science syllabus for {subject}.")
}

fn numbered(instructions: &[String]) -> String {
    instructions
        .iter()
        .enumerate()
        .map(|(i, inst)| format!("{}. {}", i + 1, inst))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assemble(intro: &str, header: &[String], instructions: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str(intro);
    prompt.push_str("\n\n");
    for line in header {
        prompt.push_str(line);
        prompt.push('\n');
    }
    prompt.push_str("\nInstructions:\n");
    prompt.push_str(&numbered(instructions));
    prompt.push('\n');
    prompt
}

fn question_header(selection: &ValidSelection, fields: &str) -> Vec<String> {
    let mut header = vec![
        format!("Subject: {}", selection.subject),
        syllabus_line(selection.subject),
    ];
    if let Some(difficulty) = selection.difficulty {
        header.push(format!("Difficulty: {}", difficulty.prompt_label()));
    }
    header.push(language_line(selection.language, fields));
    header
}

fn chapter_header(selection: &ValidSelection) -> Vec<String> {
    vec![
        format!("Subject: {}", selection.subject),
        format!("Chapter: \"{}\"", selection.scope.label()),
        syllabus_line(selection.subject),
        format!("Language: All generated text MUST be in {}.", selection.language),
    ]
}

// ============================================================================
// Per-mode prompts
// ============================================================================

fn mcq_prompt(selection: &ValidSelection) -> String {
    let count = selection.question_count;
    let thinking = "Each question must not be a simple recall question. It should test higher-order thinking skills such as understanding, analysis, application, evaluation, or creativity.";

    let mut instructions = vec![format!("Generate exactly {count} unique MCQ(s).")];
    instructions.push(match difficulty_directive(selection.difficulty) {
        Some(directive) => format!("{thinking} {directive}"),
        None => thinking.to_string(),
    });
    instructions.push(SOURCE_INSTRUCTION.to_string());
    instructions.push(format!(
        "The question and all options must be clear, concise, and unambiguous, and written in {}.",
        selection.language
    ));
    instructions.push(
        "Each question must have exactly 4 options. The incorrect options (distractors) must be plausible and based on common student misconceptions.".to_string(),
    );
    instructions.push(
        "Provide a detailed explanation not only for why the correct answer is right but also for why each of the 3 incorrect options is wrong.".to_string(),
    );
    instructions.push(format!(
        "Return the output strictly in the provided JSON format, which is an array of exactly {count} MCQ objects. The 'id' for options must be {}.",
        quoted_option_ids()
    ));
    instructions.extend(chapter_focus_directive(selection));
    instructions.extend(syllabus_coverage_directive(selection));

    let intro = format!(
        "{QUESTION_SETTER_ROLE} Your task is to generate {count} high-quality, innovative Multiple Choice Question(s) (MCQ) for students who have just passed CBSE Class 10."
    );
    assemble(
        &intro,
        &question_header(selection, "question, options, explanations"),
        &instructions,
    )
}

fn subjective_prompt(selection: &ValidSelection) -> String {
    let mut instructions = vec![
        "Generate a set of subjective questions.".to_string(),
        "The question set must contain exactly three types of questions: 10 Very Short Answer, 6 Short Answer, and 4 Long Answer questions.".to_string(),
    ];
    instructions.extend(difficulty_directive(selection.difficulty));
    instructions.push(SOURCE_INSTRUCTION.to_string());
    instructions.push(format!(
        "The questions and answers must be clear, concise, and unambiguous, and written in {}.",
        selection.language
    ));
    instructions.push(
        [
            "**Answer Length Rules:**",
            " - Very Short Answers: Must be in one or two sentences.",
            " - Short Answers: Must be in three or four sentences.",
            " - Long Answers: Must be structured with exactly 6 distinct bullet points. Do not use numbers (e.g., 1., 2.); use bullet symbols (e.g., • or -) instead.",
        ]
        .join("\n"),
    );
    instructions.push(format!(
        "For every question, the 'answer' string must begin with the prefix '{ANSWER_PREFIX}' followed by the actual answer."
    ));
    instructions.push("Return the output strictly in the provided JSON format.".to_string());
    instructions.extend(chapter_focus_directive(selection));

    if selection.subject == Subject::Biology {
        instructions.push(
            "**Biology Specific:** At least two of the six 'Short Answer' questions MUST be figure-based. Describe a biological diagram or scenario and ask questions based on it (e.g., 'A diagram of a neuron is shown... Identify part X and state its function.').".to_string(),
        );
    }

    let intro = format!(
        "{QUESTION_SETTER_ROLE} Your task is to generate a high-quality, innovative set of Subjective Questions for students who have just passed CBSE Class 10."
    );
    assemble(&intro, &question_header(selection, "questions, answers"), &instructions)
}

fn study_guide_prompt(selection: &ValidSelection) -> String {
    let instructions: Vec<String> = [
        "Create a detailed study guide for the specified chapter only.",
        "The guide must be broken down into exactly five distinct sections as defined in the JSON schema: summary, keywords, difficultConcepts, commonMistakes, examTips.",
        "**Summary:** Provide an elaborate and detailed summary of the chapter's key topics. Cover the main concepts and their relationships comprehensively, presenting the information as a list of bullet points.",
        "**Keywords:** List crucial scientific terms from the chapter and provide simple, clear definitions.",
        "**Difficult Concepts Explained:** Identify a comprehensive list of concepts students often find difficult. For each, provide an in-depth, step-by-step explanation. You MUST include a relevant real-world example or analogy for each concept.",
        "**Common Mistakes:** List common errors or misconceptions students make related to this chapter's content.",
        "**Exam Tips:** Offer practical advice on how to study for and answer questions from this chapter in an exam.",
        "Return the output strictly in the provided JSON format. The content should be accurate, engaging, and pedagogically sound.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let intro = "You are an expert educator and content creator for students in India. Your task is to generate a comprehensive, high-quality Study Guide for a specific chapter for students who have just passed CBSE Class 10.";
    assemble(intro, &chapter_header(selection), &instructions)
}

fn concept_map_prompt(selection: &ValidSelection) -> String {
    let instructions: Vec<String> = [
        "Create a concept map with the main chapter topic as the single root node.",
        "Branch out from the root node to major sub-topics.",
        "Further branch out from sub-topics to related concepts, definitions, or key points.",
        "The structure must be strictly hierarchical (a tree structure). A parent node should connect to one or more child nodes, and every node has exactly one parent except the root.",
        "Keep the concept text in each node concise and to the point.",
        "The depth of the map should be sufficient to cover the chapter's core ideas, typically 3-4 levels deep including the root. Never exceed 4 levels.",
        "Return the output strictly in the provided JSON format, representing a nested tree structure. The root object is the main concept of the chapter.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let intro = "You are an expert educational designer specializing in visual learning tools. Your task is to generate a hierarchical, top-down concept map for a specific chapter for students who have just passed CBSE Class 10.";
    assemble(intro, &chapter_header(selection), &instructions)
}

fn quoted_option_ids() -> String {
    OPTION_IDS
        .iter()
        .map(|id| format!("'{id}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
