// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed persona the responder speaks as.

use folio_core::types::ConversationTurn;

/// Display name of the persona.
pub const PERSONA_NAME: &str = "Josefin Hao";

/// Public contact address quoted in answers.
pub const CONTACT_EMAIL: &str = "josefin.rui.hao@gmail.com";

/// System instruction sent ahead of every upstream conversation.
pub const SYSTEM_PROMPT: &str = include_str!("../persona/system_prompt.md");

/// The system turn that prefixes every upstream request.
pub fn system_turn() -> ConversationTurn {
    ConversationTurn::system(SYSTEM_PROMPT.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Role;

    #[test]
    fn prompt_speaks_as_the_persona() {
        assert!(SYSTEM_PROMPT.starts_with(&format!("You are {PERSONA_NAME}.")));
        assert!(SYSTEM_PROMPT.contains("first person"));
    }

    #[test]
    fn prompt_carries_contact_details() {
        assert!(SYSTEM_PROMPT.contains(CONTACT_EMAIL));
        assert!(SYSTEM_PROMPT.contains("contact form"));
    }

    #[test]
    fn system_turn_has_system_role() {
        let turn = system_turn();
        assert_eq!(turn.role, Role::System);
        assert!(!turn.content.ends_with('\n'));
    }
}
