//! The `skillcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create example assessment
    std::fs::create_dir_all("assessments")?;
    let assessment_path = std::path::Path::new("assessments/example.toml");
    if assessment_path.exists() {
        println!("assessments/example.toml already exists, skipping.");
    } else {
        std::fs::write(assessment_path, EXAMPLE_ASSESSMENT)?;
        println!("Created assessments/example.toml");
    }

    // Create matching answer sheet
    let answers_path = std::path::Path::new("answers.toml");
    if answers_path.exists() {
        println!("answers.toml already exists, skipping.");
    } else {
        std::fs::write(answers_path, EXAMPLE_ANSWERS)?;
        println!("Created answers.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit assessments/example.toml with your questions");
    println!("  2. Run: skillcheck validate --assessment assessments/example.toml");
    println!("  3. Run: skillcheck run --assessment assessments/example.toml --answers answers.toml");

    Ok(())
}

const EXAMPLE_ASSESSMENT: &str = r#"[assessment]
id = "example"
title = "Example Assessment"
description = "A starter assessment covering the basic question types"
time_limit_minutes = 30
passing_score = 70

[[questions]]
id = "js-001"
type = "multiple_choice"
text = "Which of the following is not a JavaScript data type?"
category = "JavaScript"
difficulty = "Beginner"
points = 5
options = ["String", "Boolean", "Float", "Symbol"]
correct_option = 2
correct_feedback = "Right, JavaScript has a single Number type."
incorrect_feedback = "JavaScript numbers are all of type Number."

[[questions]]
id = "js-002"
type = "true_false"
text = "The === operator checks for both value and type equality."
category = "JavaScript"
difficulty = "Beginner"
correct = true

[[questions]]
id = "js-003"
type = "code_completion"
text = "Complete the function so it doubles every element of the array."
category = "JavaScript"
difficulty = "Intermediate"
points = 10
code_snippet = """
function doubleAll(items) {
  return items.___(x => x * 2);
}
"""
check = { mode = "any_pattern", patterns = ['\.map\s*\('] }
hints = ["Look for an array method that transforms each element."]

[[questions]]
id = "css-001"
type = "short_answer"
text = "Which CSS property controls the space between an element's border and its content?"
category = "CSS"
difficulty = "Beginner"
acceptable = ["padding"]

[[questions]]
id = "css-002"
type = "drag_drop"
text = "Order the selectors from lowest to highest specificity."
category = "CSS"
difficulty = "Intermediate"
items = ["element", "class", "id", "inline style"]
correct_order = [0, 1, 2, 3]

[[questions]]
id = "html-001"
type = "matching"
text = "Match each HTML element to its purpose."
category = "HTML"
difficulty = "Beginner"
terms = ["<nav>", "<article>", "<aside>"]
definitions = ["navigation links", "self-contained content", "tangential content"]
pairs = [[0, 0], [1, 1], [2, 2]]

[[questions]]
id = "html-002"
type = "true_false"
text = "The <main> element may appear more than once per document."
category = "HTML"
difficulty = "Beginner"
correct = false
"#;

const EXAMPLE_ANSWERS: &str = r#"# Answer sheet for assessments/example.toml
#
# Keys are question ids. Values use the shape each question type expects:
# an option index, a boolean, free text, an ordering, or a pair list.

[answers]
js-001 = 2
js-002 = true
js-003 = "return items.map(x => x * 2);"
css-001 = "padding"
css-002 = [0, 1, 2, 3]
html-001 = [[0, 0], [1, 1], [2, 2]]
html-002 = false
"#;
