/* ===============================================================================
Restaurant menu bot.
Dialogue FSM. 14 May 2021.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use derive_more::From;
use std::sync::Arc;
use teloxide::{prelude::*,
   types::{ReplyMarkup, KeyboardButton, KeyboardMarkup, ParseMode, UserId, ChatId, },
   dispatching::{dialogue::{self, InMemStorage}, UpdateHandler, UpdateFilterExt, },
   utils::html,
};

use std::str::FromStr;
use strum::{AsRefStr, EnumString,};

use crate::environment as env;
use crate::admin::{self, AdminState, AdminStateEditing, };
use crate::navigation::{self, Route, };
use crate::store::Store;
use crate::loc::*;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), BoxError>;

// Telegram limit is 4096, leave a room for markup
const MAX_TEXT_LEN: usize = 4000;

// FSM states
#[derive(Clone, From)]
pub enum State {
   Start(StartState), // initial state
   Main(MainState), // await for select menu item from bottom
   Admin(AdminState), // in admin panel
   AdminSubmode(AdminStateEditing), // in admin panel edit field
}

impl Default for State {
   fn default() -> Self {
      Self::Start(StartState { restarted: true })
   }
}

// Main menu
#[derive(AsRefStr, EnumString)]
enum Command {
   #[strum(to_string = "View Menu")]
   Menu,  // show all dishes
   #[strum(to_string = "Chef Specials")]
   Specials,  // show special dishes
   #[strum(to_string = "Admin Login")]
   Admin,  // admin panel
   #[strum(to_string = "/start")]
   Start,
   Unknown,
}

// Frequently used menu
pub fn cancel_markup() -> ReplyMarkup {
   kb_markup(vec![vec![loc(Key::CommonCancel, &[])]])
}

// Construct keyboard from strings
pub fn kb_markup(keyboard: Vec<Vec<String>>) -> ReplyMarkup {
   let kb: Vec<Vec<KeyboardButton>> = keyboard.iter()
      .map(|row| {
         row.iter()
         .map(|label| KeyboardButton::new(label))
         .collect()
      })
      .collect();

   let markup = KeyboardMarkup::new(kb)
      .resize_keyboard();

   ReplyMarkup::Keyboard(markup)
}

pub fn main_menu_markup() -> ReplyMarkup {
   let commands = vec![
      String::from(Command::Menu.as_ref()),
      String::from(Command::Specials.as_ref()),
      String::from(Command::Admin.as_ref()),
   ];
   kb_markup(vec![commands])
}

// Glue lines to the head while the message fits into Telegram limit
pub fn join_limited<I>(head: String, lines: I) -> String
where I: IntoIterator<Item = String>
{
   let mut res = head;
   for line in lines {
      if res.chars().count() + line.chars().count() + 1 > MAX_TEXT_LEN {
         res.push_str("\n...");
         break;
      }
      res.push('\n');
      res.push_str(&line);
   }
   res
}

#[derive(Clone)]
pub struct StartState {
   pub restarted: bool,
}

#[derive(Clone)]
pub struct MainState {
   pub user_id: UserId,
}

async fn start(bot: Bot, msg: Message, dialogue: MyDialogue, state: StartState, store: Arc<Store>) -> HandlerResult {
   let chat_id = msg.chat.id;

   // Extract user id
   let user_id = match msg.from.as_ref() {
      Some(user) => user.id,
      None => {
         bot.send_message(chat_id, "Error, no user")
         .await?;
         dialogue.update(StartState { restarted: false }).await?;
         return Ok(());
      }
   };
   let new_state = MainState { user_id };

   let input = msg.text().unwrap_or_default();
   let cmd = Command::from_str(input).unwrap_or(Command::Unknown);

   // Report about a possible restart and loss of context
   if state.restarted && !matches!(cmd, Command::Start) {
      let text = loc(Key::StatesRestarted, &[]);
      bot.send_message(chat_id, text)
      .reply_markup(main_menu_markup())
      .await?;
   }

   dialogue.update(new_state.clone()).await?;

   // Try to execute command or greet
   match cmd {
      Command::Unknown => navigate(&bot, chat_id, &dialogue, new_state, &store, Route::Home).await,
      _ => select_command(bot, msg, dialogue, new_state, store, cmd).await,
   }
}

async fn update(bot: Bot, msg: Message, dialogue: MyDialogue, state: MainState, store: Arc<Store>) -> HandlerResult {
   // Parse and handle commands
   let input = msg.text().unwrap_or_default();
   let cmd = Command::from_str(input).unwrap_or(Command::Unknown);
   select_command(bot, msg, dialogue, state, store, cmd).await
}

async fn select_command(bot: Bot, msg: Message, dialogue: MyDialogue, state: MainState, store: Arc<Store>, cmd: Command) -> HandlerResult {
   let chat_id = msg.chat.id;
   let route = match cmd {
      Command::Menu => Route::Menu,
      Command::Specials => Route::ChefSpecials,
      Command::Admin => Route::Admin,
      Command::Start => Route::Home,
      Command::Unknown => {
         let text = if msg.text().is_none() {
            loc(Key::CommonTextPlease, &[])
         } else {
            loc(Key::StatesMainMenu, &[])
         };
         bot.send_message(chat_id, text)
         .reply_markup(main_menu_markup())
         .await?;
         return Ok(());
      }
   };

   navigate(&bot, chat_id, &dialogue, state, &store, route).await
}

// Show the screen for the route
pub async fn navigate(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, state: MainState, store: &Store, route: Route) -> HandlerResult {
   match route {
      Route::Home => {
         let text = welcome_text(&env::title());
         bot.send_message(chat_id, text)
         .reply_markup(main_menu_markup())
         .parse_mode(ParseMode::Html)
         .await?;
         dialogue.update(state).await?;
         Ok(())
      }
      Route::Admin => admin::enter(bot, chat_id, dialogue, state, store).await,
      route => navigation::show(bot, chat_id, store, route).await,
   }
}

// Restaurant name comes from settings, not a markup
fn welcome_text(title: &str) -> String {
   loc(Key::StatesWelcome, &[&html::escape(title)])
}

// Return to main menu from submodes
pub async fn reload(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, state: MainState, text: String) -> HandlerResult {
   bot.send_message(chat_id, text)
   .reply_markup(main_menu_markup())
   .await?;
   dialogue.update(state).await?;
   Ok(())
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {

   let message_handler = Update::filter_message()
   .branch(
      // Private message handler
      dptree::filter(|msg: Message| {
         msg.chat.is_private()
      })
      .branch(dptree::case![State::Start(start_state)].endpoint(start))
      .branch(dptree::case![State::Main(main_state)].endpoint(update))
      .branch(dptree::case![State::Admin(admin_state)].endpoint(admin::update))
      .branch(dptree::case![State::AdminSubmode(admin_state)].endpoint(admin::update_edit))
   );

   let callback_query_handler = Update::filter_callback_query()
   .endpoint(crate::callback::update);

   dialogue::enter::<Update, InMemStorage<State>, State, _>()
   .branch(message_handler)
   .branch(callback_query_handler)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn main_menu_captions_parse_back() {
      assert!(matches!(Command::from_str("View Menu"), Ok(Command::Menu)));
      assert!(matches!(Command::from_str("Chef Specials"), Ok(Command::Specials)));
      assert!(matches!(Command::from_str("Admin Login"), Ok(Command::Admin)));
      assert!(matches!(Command::from_str("/start"), Ok(Command::Start)));
      assert!(Command::from_str("hello").is_err());
   }

   #[test]
   fn welcome_escapes_title() {
      let text = welcome_text("Fish & <Chips>");
      assert!(text.starts_with("Welcome to <b>Fish &amp; &lt;Chips&gt;</b>!"));
   }

   #[test]
   fn long_text_is_cut_by_lines() {
      let lines = (0..1000).map(|i| format!("line {}", i));
      let text = join_limited(String::from("head"), lines);
      assert!(text.chars().count() <= MAX_TEXT_LEN + 4);
      assert!(text.starts_with("head\nline 0\nline 1"));
      assert!(text.ends_with("\n..."));

      let text = join_limited(String::from("head"), vec![String::from("a"), String::from("b")]);
      assert_eq!(text, "head\na\nb");
   }
}
