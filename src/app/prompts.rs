//! Fixed texts: the hidden system prompt and the help screen.

/// Sent as the `system` field of every completion request.
pub const SYSTEM_PROMPT: &str = "You are a bash terminal helper AI. Unless the user asks otherwise, \
you will specify all solutions in bash commands, ideally one-liners if the task is simple. \
Before displaying a bash command, you must surround it with <command></command> tags. \
Each <command> block must contain exactly one command - if you need to show multiple commands, \
use multiple <command> blocks. Do not put markdown code fences inside <command> blocks.";

pub const HELP_TEXT: &str = "\
gpt-term help

Anywhere
  Ctrl+C        quit
  Ctrl+N        start a new chat
  Ctrl+J/K      navigate messages (edit mode)
  Ctrl+X        run a command from the latest reply
  Ctrl+L        load the next most recent conversation
  F1            show this help (also Ctrl+H where the terminal reports it)

Chat
  Enter         send (with an empty prompt: resend the last unanswered message)
  Up/Down       scroll 3 lines
  PgUp/PgDn     scroll half a page
  Home/End      jump to top/bottom
  Ctrl+A/E      move to start/end of the prompt
  Alt+J/K       navigate messages (edit mode)
  Ctrl+R        browse conversation history
  Esc           quit

Edit mode
  j/k           select next/previous message
  Enter         edit the selected message in $EDITOR; later messages are discarded
  x             run a command from the selected reply
  c             copy the selected message
  Esc           back to chat

Command selection
  Up/Down       choose
  1-9           run that command
  Enter         run the selected command
  c             copy the selected command
  Esc           cancel

Commands in replies are highlighted with a $ marker. Command output is added
to the conversation as a new message.";
