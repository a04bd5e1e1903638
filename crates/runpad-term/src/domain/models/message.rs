#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Author;

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

/// Text shown in the output panel or the assistant dialog. Error messages carry the
/// `Error: ` prefix so they read differently from normal output.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub message_type: MessageType,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            message_type: MessageType::Normal,
        };
    }

    pub fn new_with_type(author: Author, message_type: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            message_type,
        };
    }

    pub fn error(author: Author, detail: impl std::fmt::Display) -> Message {
        return Message::new_with_type(author, MessageType::Error, &format!("Error: {detail}"));
    }

    pub fn is_error(&self) -> bool {
        return self.message_type == MessageType::Error;
    }

    pub fn is_empty(&self) -> bool {
        return self.text.is_empty();
    }

    pub fn codeblocks(&self) -> Vec<String> {
        let mut codeblocks: Vec<String> = vec![];
        let mut current_codeblock: Vec<&str> = vec![];
        let mut in_codeblock = false;

        for line in self.text.split('\n') {
            let trimmed = line.trim();
            if trimmed.starts_with("```") {
                if in_codeblock {
                    codeblocks.push(current_codeblock.join("\n"));
                    current_codeblock = vec![];
                    in_codeblock = false
                } else {
                    in_codeblock = true;
                }
                continue;
            }

            if in_codeblock {
                current_codeblock.push(line);
            }
        }

        return codeblocks;
    }
}
