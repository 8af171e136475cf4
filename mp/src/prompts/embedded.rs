//! Embedded prompt templates
//!
//! The scheduling constraints are described to the model in prose; nothing
//! in this repository verifies that the returned schedule satisfies them.

/// Handlebars template for the schedule generation prompt
pub const SCHEDULE_PROMPT: &str = r#"You are an expert meeting-scheduling assistant for multiple teams. Based on the following general parameters and the list of teams, generate a meeting schedule starting from today's date ({{today}}).

General parameters:
- Scheduling period (frequency): {{frequency}}. All meetings needed to cover each team's topics must be scheduled within the next single period: one week (weekly), two weeks (biweekly) or one month (monthly). If a team needs multiple meetings, all of them must fall within this one period. The schedule must not repeat or extend beyond it.
- Allowed weekdays: {{days}}
- Availability window start: {{start_time}}
- Availability window end: {{end_time}}
- Lunch break: {{#if lunch}}from {{lunch.start}} to {{lunch.end}}. This period MUST be treated as an unavailable block inside the availability window. It is strictly FORBIDDEN to schedule any meeting that overlaps this period, even partially.{{else}}No lunch break is defined. Avoid scheduling meetings between 12:00 and 13:00 if possible.{{/if}}
- Duration per topic (minutes): {{topic_duration_mins}}
- Maximum topics per meeting: {{max_topics_per_meeting}}
- Minimum break between meetings on the same day (minutes): {{break_mins}}

Teams to schedule:
{{#each teams}}
- Team: {{name}} (Total topics: {{total_topics}}{{#if breakdown}}, Participants: {{breakdown}}{{/if}})
{{/each}}

Instructions:
1. For each team, look at the total number of topics.
2. Compute the number of meetings each team needs by dividing its total topics by the "Maximum topics per meeting" and rounding up. Distribute the topics as evenly as possible across those meetings. For example, a team with 10 topics and a maximum of 8 should get two meetings with 5 topics each.
3. When assigning topics, prefer keeping all of one participant's topics inside the same meeting, unless the topic limit makes that impossible.
4. The meeting title must be the team name. When a team needs multiple meetings, add a numeric suffix to tell them apart (e.g. "Team Alpha (1/2)" and "Team Alpha (2/2)"). Do not add prefixes such as "Sync".
5. **MANDATORY SPACING RULE (VERY IMPORTANT):** When a team has multiple meetings (e.g. Meeting A (1/2) and Meeting A (2/2)), those meetings must NEVER fall on the same day.
   - The top priority is to schedule them on different days.
   - For a biweekly or monthly period, the priority is to schedule them in different weeks.
   - This rule matters more than packing all meetings as early as possible. Spread them out to guarantee the spacing.
6. Compute each meeting's duration individually from the number of topics assigned to it.
7. **BALANCED DISTRIBUTION (CRITICAL, MANDATORY RULE):** The distribution of meetings must be as balanced as possible at every level. This is the scheduling's top priority.
   - **Across weeks:** Compute the total number of meetings to schedule. Divide that total by the number of weeks in the period (1 for weekly, 2 for biweekly, 4 for monthly). The result is the per-week target. For example, 11 meetings in a biweekly period must end up as 5 or 6 meetings in week 1 and 5 or 6 in week 2. Scheduling 9 meetings in the first week and 2 in the second is UNACCEPTABLE.
   - **Across weekdays:** Within each week, spread the meetings evenly over the allowed days. Do not concentrate everything at the start of the week (e.g. Monday and Tuesday). Use all allowed days.
   - **Within the day:** On days with more than one meeting, try to place one in the morning and one in the afternoon when possible, so neither half of the day is overloaded.
8. Respect the frequency, the allowed weekdays and the availability window for ALL meetings.
9. **BREAK AND LUNCH RULES (CRITICAL, MANDATORY):** Complying with the following rules matters more than any other schedule optimization (such as grouping meetings). If necessary to comply, move meetings to other days or weeks.
   - **Break between meetings:** There must be a minimum gap of {{break_mins}} minutes between the end of one meeting and the start of the next on the same day. This rule is ABSOLUTE.
   - **Lunch break:** The lunch rule is even stricter and ABSOLUTE. The defined lunch period is an unavailable block. No meeting may be scheduled inside it, not even partially.
10. Dates must use the YYYY-MM-DD format and times the HH:mm format.
11. Instead of a list of generic topics, the 'participants_info' field must be an array of objects, each containing 'participant_name' and 'topics', stating how many topics that participant will present in that specific meeting.
12. The output must be a JSON array of meeting objects. Make sure the 'team_name' property of each meeting object matches the correct team name.
"#;
