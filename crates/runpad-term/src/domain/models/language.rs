#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use super::LookupError;

/// A language the execution service can run, with the starter snippet shown when it
/// is selected.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub display_name: &'static str,
    pub api_id: &'static str,
    pub runtime_version: &'static str,
    pub output_filename: &'static str,
    pub boilerplate: &'static str,
}

static LANGUAGES: [LanguageDescriptor; 5] = [
    LanguageDescriptor {
        display_name: "JavaScript",
        api_id: "javascript",
        runtime_version: "18.15.0",
        output_filename: "index.js",
        boilerplate: "console.log('Hello, JavaScript!');",
    },
    LanguageDescriptor {
        display_name: "Python",
        api_id: "python",
        runtime_version: "3.10.0",
        output_filename: "main.py",
        boilerplate: "print(\"Hello, Python!\")",
    },
    LanguageDescriptor {
        display_name: "C",
        api_id: "c",
        runtime_version: "10.2.0",
        output_filename: "main.c",
        boilerplate: r#"#include <stdio.h>

int main() {
    printf("Hello, C!\n");
    return 0;
}"#,
    },
    LanguageDescriptor {
        display_name: "C++",
        api_id: "cpp",
        runtime_version: "10.2.0",
        output_filename: "main.cpp",
        boilerplate: r#"#include <iostream>

int main() {
    std::cout << "Hello, C++!" << std::endl;
    return 0;
}"#,
    },
    LanguageDescriptor {
        display_name: "Java",
        api_id: "java",
        runtime_version: "15.0.2",
        output_filename: "Main.java",
        boilerplate: r#"public class Main {
    public static void main(String[] args) {
        System.out.println("Hello, Java!");
    }
}"#,
    },
];

pub struct Languages {}

impl Languages {
    pub fn all() -> &'static [LanguageDescriptor] {
        &LANGUAGES
    }

    pub fn default_language() -> &'static LanguageDescriptor {
        &LANGUAGES[0]
    }

    pub fn api_ids() -> Vec<&'static str> {
        LANGUAGES.iter().map(|e| e.api_id).collect()
    }

    pub fn find_by_api_id(api_id: &str) -> Result<&'static LanguageDescriptor, LookupError> {
        LANGUAGES
            .iter()
            .find(|e| e.api_id == api_id)
            .ok_or_else(|| LookupError::NotFound(api_id.to_string()))
    }

    /// Returns the entry after `current`, wrapping around to the first one.
    pub fn next_after(current: &LanguageDescriptor) -> &'static LanguageDescriptor {
        let idx = LANGUAGES
            .iter()
            .position(|e| e.api_id == current.api_id)
            .unwrap_or(0);

        &LANGUAGES[(idx + 1) % LANGUAGES.len()]
    }
}
