/* ===============================================================================
Restaurant menu bot.
Localize module. 02 August 2022.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::fmt::{Display, Write, };
use strum::{AsRefStr, };

pub type Args<'a> = &'a [&'a dyn Display];

#[derive(AsRefStr, Debug, Clone, Copy)]
pub enum Key {
   CommonCancel,
   CommonTextPlease,
   StatesRestarted,
   StatesWelcome,
   StatesMainMenu,
   NavigationMenuTitle,
   NavigationMenuEmpty,
   NavigationSpecialsTitle,
   NavigationSpecialsEmpty,
   NavigationSpecialBadge,
   NavigationDescription,
   NavigationIngredients,
   NavigationPrice,
   NavigationNoItem,
   NavigationBack,
   CallbackUnknown,
   AdminTitle,
   AdminYes,
   AdminNo,
   AdminSpecial,
   AdminEditingMark,
   AdminCurrent,
   AdminNoDishes,
   AdminDishLine,
   AdminSpecialMark,
   AdminCommandSave,
   AdminCommandUpdate,
   AdminCommandClear,
   AdminCommandView,
   AdminCommandExit,
   AdminCommandEdit,
   AdminCommandDelete,
   AdminCommandEmpty,
   AdminUnknown,
   AdminEnterEdit,
   AdminUpdateEdit1,
   AdminUpdateEdit2,
   AdminValidation,
   AdminAdded,
   AdminUpdated,
   AdminLoaded,
   AdminNoDish,
   AdminGone,
   AdminExit,
   ConfirmRemove,
   ConfirmClear,
   ConfirmButtonCancel,
   ConfirmButtonRemove,
   ConfirmButtonClear,
   ConfirmRemoved,
   ConfirmCleared,
   ConfirmCancelled,
   LogRemoved,
   LogCleared,
   LogSaved,
}

fn template(key: Key) -> &'static str {
   match key {
      Key::CommonCancel => "/",
      Key::CommonTextPlease => "Text message, please!",
      Key::StatesRestarted => "Sorry, the bot was restarted",
      Key::StatesWelcome => "Welcome to <b>{}</b>!\nPress 'View Menu' to see all dishes, 'Chef Specials' for our recommendations or 'Admin Login' to edit the menu.",
      Key::StatesMainMenu => "You are in the main menu",
      Key::NavigationMenuTitle => "<b>Menu</b>",
      Key::NavigationMenuEmpty => "No dishes yet.",
      Key::NavigationSpecialsTitle => "<b>Chef Specials</b>",
      Key::NavigationSpecialsEmpty => "No specials available.",
      Key::NavigationSpecialBadge => "<i>Chef's Special</i>",
      Key::NavigationDescription => "<b>Description</b>",
      Key::NavigationIngredients => "<b>Ingredients</b>",
      Key::NavigationPrice => "<b>Price</b>",
      Key::NavigationNoItem => "No item selected.",
      Key::NavigationBack => "⏪Back",
      Key::CallbackUnknown => "Unknown command",
      Key::AdminTitle => "<b>Admin Panel</b>",
      Key::AdminYes => "Yes",
      Key::AdminNo => "No",
      Key::AdminSpecial => "Chef's Special",
      Key::AdminEditingMark => "<i>Editing dish {}</i>",
      Key::AdminCurrent => "<b>Current Dishes ({})</b>",
      Key::AdminNoDishes => "No dishes added yet.",
      Key::AdminDishLine => "<b>{}</b>\n{}{}{} /edit{} /del{}",
      Key::AdminSpecialMark => "⭐Special",
      Key::AdminCommandSave => "Save",
      Key::AdminCommandUpdate => "Update Dish",
      Key::AdminCommandClear => "Clear Menu",
      Key::AdminCommandView => "View Menu",
      Key::AdminCommandExit => "Exit",
      Key::AdminCommandEdit => "/edit",
      Key::AdminCommandDelete => "/del",
      Key::AdminCommandEmpty => "-",
      Key::AdminUnknown => "Admin panel: unknown command '{}'",
      Key::AdminEnterEdit => "Enter {} (- to leave empty, / to cancel), current value: {}",
      Key::AdminUpdateEdit1 => "Cancel, value not changed",
      Key::AdminUpdateEdit2 => "{} changed",
      Key::AdminValidation => "Please fill in all required fields.",
      Key::AdminAdded => "Dish added successfully!",
      Key::AdminUpdated => "Dish updated successfully!",
      Key::AdminLoaded => "Dish '{}' loaded into the form, change the fields and press 'Update Dish'",
      Key::AdminNoDish => "There is no dish with code {}",
      Key::AdminGone => "Dish {} was removed meanwhile, the menu is unchanged. Press 'Save' to add the form as a new dish",
      Key::AdminExit => "You left the admin panel",
      Key::ConfirmRemove => "Remove this dish?\n<b>{}</b>",
      Key::ConfirmClear => "Clear all menu items?",
      Key::ConfirmButtonCancel => "Cancel",
      Key::ConfirmButtonRemove => "Remove",
      Key::ConfirmButtonClear => "Clear",
      Key::ConfirmRemoved => "Dish removed",
      Key::ConfirmCleared => "Menu cleared",
      Key::ConfirmCancelled => "Cancelled",
      Key::LogRemoved => "{} removed dish {}",
      Key::LogCleared => "{} cleared the menu",
      Key::LogSaved => "{} saved dish {} '{}'",
   }
}

// Fill placeholders {} with arguments in order
pub fn loc(key: Key, args: Args) -> String {
   let mut parts = template(key).split("{}");
   let mut res = String::from(parts.next().unwrap_or_default());
   let mut args = args.iter();

   for part in parts {
      match args.next() {
         Some(arg) => {
            if write!(res, "{}", arg).is_err() {
               log::error!("loc::loc {} argument", key.as_ref());
            }
         }
         None => res.push_str("{}"),
      }
      res.push_str(part);
   }
   res
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn placeholders_in_order() {
      let name = String::from("Nachos");
      assert_eq!(loc(Key::LogSaved, &[&"Bob", &2, &name]), "Bob saved dish 2 'Nachos'");
      assert_eq!(loc(Key::AdminAdded, &[]), "Dish added successfully!");
   }

   #[test]
   fn missing_arguments_stay_visible() {
      assert_eq!(loc(Key::AdminCurrent, &[]), "<b>Current Dishes ({})</b>");
   }
}
