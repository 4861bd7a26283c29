#[cfg(test)]
mod tests {
    use crate::candidates::{self, CANDIDATES};
    use crate::error::{check_can_submit, classify_insert_failure, Error};
    use crate::export::{csv_field, pin_matches, render_csv};
    use crate::models::{decode_vote_insert, AggregateRow, SocketMessage, VOTES_TOPIC};
    use crate::tally::Tally;

    fn row(candidate_id: &str, total: u64) -> AggregateRow {
        AggregateRow { candidate_id: candidate_id.into(), total }
    }

    #[test]
    fn tally_starts_at_zero_for_every_candidate() {
        let tally = Tally::new();
        for c in CANDIDATES {
            assert_eq!(tally.count(c.id), 0);
        }
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn registry_ids_survive_any_update_sequence() {
        let mut tally = Tally::new();
        tally.record_insert("c1");
        tally.apply_snapshot(&[row("c2", 4)]);
        tally.record_insert("c3");
        tally.apply_snapshot(&[]);
        tally.record_insert("ghost");
        assert_eq!(tally.counts().len(), CANDIDATES.len());
        for c in CANDIDATES {
            assert!(tally.counts().contains_key(c.id));
        }
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn snapshot_replaces_everything() {
        let mut tally = Tally::new();
        tally.record_insert("c1");
        tally.record_insert("c1");
        tally.apply_snapshot(&[row("c2", 7)]);
        assert_eq!(tally.count("c1"), 0, "stale optimistic increments must not survive a poll");
        assert_eq!(tally.count("c2"), 7);
        assert_eq!(tally.total(), 7);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let rows = [row("c1", 3), row("c2", 5)];
        let mut a = Tally::new();
        a.apply_snapshot(&rows);
        let mut b = a.clone();
        b.apply_snapshot(&rows);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_ids_are_dropped_on_both_paths() {
        let mut tally = Tally::new();
        tally.apply_snapshot(&[row("c1", 2), row("c99", 40)]);
        assert_eq!(tally.total(), 2);
        tally.record_insert("c99");
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn percentages_are_zero_without_ballots() {
        let tally = Tally::new();
        for c in CANDIDATES {
            assert_eq!(tally.percentage(c.id), 0);
        }
    }

    #[test]
    fn percentages_round_to_whole_numbers() {
        let mut tally = Tally::new();
        tally.apply_snapshot(&[row("c1", 1), row("c2", 2)]);
        assert_eq!(tally.percentage("c1"), 33);
        assert_eq!(tally.percentage("c2"), 67);
        assert_eq!(tally.percentage("c3"), 0);
    }

    #[test]
    fn first_vote_lands_via_push_or_poll() {
        // Push first:
        let mut tally = Tally::new();
        tally.record_insert("c1");
        assert_eq!(tally.count("c1"), 1);
        assert_eq!(tally.total(), 1);
        // Poll first:
        let mut tally = Tally::new();
        tally.apply_snapshot(&[row("c1", 1)]);
        assert_eq!(tally.count("c1"), 1);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn submit_precheck_blocks_before_any_network() {
        assert!(matches!(check_can_submit(Some("c1"), true), Err(Error::DuplicateVote)));
        assert!(matches!(check_can_submit(None, false), Err(Error::NoSelection)));
        assert!(check_can_submit(Some("c1"), false).is_ok());
    }

    #[test]
    fn duplicate_key_responses_are_classified() {
        assert_eq!(classify_insert_failure(409, "{}"), Error::DuplicateVote);
        assert_eq!(
            classify_insert_failure(400, r#"{"code":"23505","message":"..."}"#),
            Error::DuplicateVote
        );
        assert_eq!(
            classify_insert_failure(500, "duplicate key value violates unique constraint"),
            Error::DuplicateVote
        );
        assert!(matches!(
            classify_insert_failure(503, "service unavailable"),
            Error::Submission(_)
        ));
    }

    #[test]
    fn search_matches_name_and_alias_case_insensitively() {
        assert_eq!(candidates::search("").len(), CANDIDATES.len());
        assert_eq!(candidates::search("   ").len(), CANDIDATES.len());

        let by_alias = candidates::search("PAK");
        assert_eq!(
            by_alias.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec!["c1", "c2", "c3"]
        );

        let by_name = candidates::search("rodi");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "c2");

        assert!(candidates::search("zzz").is_empty());
    }

    #[test]
    fn aggregate_rows_accept_numeric_and_string_totals() {
        let rows: Vec<AggregateRow> =
            serde_json::from_str(r#"[{"candidate_id":"c1","total":3},
                                     {"candidate_id":"c2","total":"12"},
                                     {"candidate_id":"c3","total":4.0},
                                     {"candidate_id":"c4","total":"garbage"}]"#)
                .unwrap();
        assert_eq!(rows[0].total, 3);
        assert_eq!(rows[1].total, 12);
        assert_eq!(rows[2].total, 4);
        assert_eq!(rows[3].total, 0);
    }

    #[test]
    fn insert_frames_decode_to_candidate_ids() {
        let frame = format!(
            r#"{{"topic":"{VOTES_TOPIC}","event":"postgres_changes","ref":null,
                 "payload":{{"ids":[1],"data":{{"type":"INSERT","record":{{"candidate_id":"c4","device_id":"d"}}}}}}}}"#
        );
        assert_eq!(decode_vote_insert(&frame), Some("c4".into()));
    }

    #[test]
    fn non_insert_frames_are_ignored() {
        let reply = format!(
            r#"{{"topic":"{VOTES_TOPIC}","event":"phx_reply","ref":"1","payload":{{"status":"ok"}}}}"#
        );
        assert_eq!(decode_vote_insert(&reply), None);
        assert_eq!(decode_vote_insert("not json"), None);

        let other_topic = r#"{"topic":"phoenix","event":"postgres_changes","ref":null,
            "payload":{"data":{"type":"INSERT","record":{"candidate_id":"c1"}}}}"#;
        assert_eq!(decode_vote_insert(other_topic), None);

        let frame = format!(
            r#"{{"topic":"{VOTES_TOPIC}","event":"postgres_changes","ref":null,
                 "payload":{{"data":{{"type":"UPDATE","record":{{"candidate_id":"c1"}}}}}}}}"#
        );
        assert_eq!(decode_vote_insert(&frame), None);
    }

    #[test]
    fn join_and_heartbeat_frames_carry_refs() {
        let join: serde_json::Value =
            serde_json::from_str(&SocketMessage::join(1).to_json()).unwrap();
        assert_eq!(join["topic"], VOTES_TOPIC);
        assert_eq!(join["event"], "phx_join");
        assert_eq!(join["ref"], "1");
        assert_eq!(
            join["payload"]["config"]["postgres_changes"][0]["event"],
            "INSERT"
        );

        let beat: serde_json::Value =
            serde_json::from_str(&SocketMessage::heartbeat(7).to_json()).unwrap();
        assert_eq!(beat["topic"], "phoenix");
        assert_eq!(beat["event"], "heartbeat");
        assert_eq!(beat["ref"], "7");
    }

    #[test]
    fn csv_lists_every_candidate_in_order() {
        let mut tally = Tally::new();
        tally.apply_snapshot(&[row("c1", 3), row("c5", 1)]);
        let csv = render_csv(&tally);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "candidate_id,name,alias,votes");
        assert_eq!(lines.len(), CANDIDATES.len() + 1);
        assert_eq!(lines[1], "c1,Rosyidi,Pak Eko,3");
        assert_eq!(lines[5], "c5,H. Azhar Hamidi,H. Dadik,1");
        assert_eq!(lines[6], "c6,Khairul Muttaqin,Jae Lolo,0");
    }

    #[test]
    fn csv_fields_are_quoted_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn pin_gate_is_exact_equality() {
        assert!(pin_matches("1234"));
        assert!(!pin_matches("12345"));
        assert!(!pin_matches(""));
    }
}
