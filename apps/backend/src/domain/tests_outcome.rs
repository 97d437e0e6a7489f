use crate::domain::outcome::{score_deltas, ScoreDelta, Winner};
use crate::domain::state::{GameState, Player};

fn table(chameleon: i64) -> Vec<Player> {
    (1..=4)
        .map(|id| {
            let mut p = Player::new(id, format!("p{id}"), "tok");
            p.is_chameleon = id == chameleon;
            p
        })
        .collect()
}

#[test]
fn chameleon_win_credits_only_the_chameleon() {
    let deltas = score_deltas(Winner::Chameleon, &table(3));
    assert_eq!(deltas.len(), 4);
    let winners: Vec<i64> = deltas.iter().filter(|d| d.won).map(|d| d.user_id).collect();
    assert_eq!(winners, vec![3]);
}

#[test]
fn players_win_credits_everyone_else() {
    let deltas = score_deltas(Winner::Players, &table(2));
    assert!(deltas.contains(&ScoreDelta { user_id: 2, won: false }));
    assert_eq!(deltas.iter().filter(|d| d.won).count(), 3);
}

#[test]
fn winners_map_to_terminal_states() {
    assert_eq!(Winner::Chameleon.terminal_state(), GameState::ChameleonWin);
    assert_eq!(Winner::Players.terminal_state(), GameState::PlayersWin);
}
