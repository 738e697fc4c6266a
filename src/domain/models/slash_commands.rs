#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    rest: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        let (prefix, rest) = match text.find(char::is_whitespace) {
            Some(idx) => text.split_at(idx),
            None => (text, ""),
        };
        if prefix.is_empty() {
            return None;
        }

        let rest = rest.trim();
        let cmd = SlashCommand {
            command: prefix.to_string(),
            args: rest.split_whitespace().map(|e| return e.to_string()).collect(),
            rest: rest.to_string(),
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_toggle()
            || cmd.is_login()
            || cmd.is_register()
            || cmd.is_upload()
            || cmd.is_session()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command exactly as typed, minus the surrounding
    /// whitespace.
    pub fn arg_text(&self) -> String {
        return self.rest.to_string();
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_toggle(&self) -> bool {
        return ["/t", "/toggle"].contains(&self.command.as_str());
    }

    pub fn is_login(&self) -> bool {
        return ["/login", "/signin"].contains(&self.command.as_str());
    }

    pub fn is_register(&self) -> bool {
        return self.command == "/register";
    }

    pub fn is_upload(&self) -> bool {
        return ["/u", "/upload"].contains(&self.command.as_str());
    }

    pub fn is_session(&self) -> bool {
        return ["/s", "/session"].contains(&self.command.as_str());
    }
}
