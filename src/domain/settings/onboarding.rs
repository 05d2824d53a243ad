use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStep {
    pub title: String,
    pub description: String,
}

const STEPS: [(&str, &str); 4] = [
    (
        "Welcome to StoryWeaver AI!",
        "Let's quickly show you how to create your first magical storybook.",
    ),
    (
        "Step 1: Your Magic Key",
        "First, you'll need a Gemini API key. It is stored only in your local settings and is needed to generate stories.",
    ),
    (
        "Step 2: Dream Up a Story",
        "Describe your story idea. You can choose the art style, narration voice, and number of pages. Get creative!",
    ),
    (
        "Step 3: Your Personal Library",
        "All your created stories are saved in your Story Library, so you can revisit your adventures anytime.",
    ),
];

pub fn walkthrough() -> Vec<OnboardingStep> {
    STEPS
        .iter()
        .map(|(title, description)| OnboardingStep {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}
