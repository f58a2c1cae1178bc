//! Coreference groups as they leave the resolver.

use crate::config::ResolverConfig;
use crate::document::OffsetStrings;
use crate::error::Result;
use multisieve_core::{Entities, Mention, MentionId, Offset, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One mention of a coreference group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMention {
    /// Id of the mention.
    pub mention_id: MentionId,
    /// Token offsets of the mention, gap-filled if configured.
    pub span: Span,
    /// Offset of the head token.
    pub head: Offset,
    /// Surface string of the span.
    #[serde(default)]
    pub text: String,
}

/// A chain of mentions referring to the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreferenceGroup {
    /// `co1`, `co2`, ... in order of the first head offset.
    pub id: String,
    /// Members, sorted by span.
    pub mentions: Vec<GroupMention>,
}

impl CoreferenceGroup {
    /// Number of mentions.
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Returns true if the group has no mentions.
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Mention ids in output order.
    pub fn mention_ids(&self) -> impl Iterator<Item = MentionId> + '_ {
        self.mentions.iter().map(|m| m.mention_id)
    }
}

/// Result of resolving one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreferenceOutput {
    /// Id of the input document, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Coreference groups.
    pub groups: Vec<CoreferenceGroup>,
}

impl CoreferenceOutput {
    /// Build the output from a resolved collection.
    ///
    /// Groups with fewer than two distinct mentions are dropped unless
    /// `config.include_singletons` is set.
    pub fn from_entities(
        document_id: Option<String>,
        entities: &Entities,
        tokens: &OffsetStrings,
        config: &ResolverConfig,
    ) -> Self {
        let full_content = if config.fill_gaps {
            tokens.offsets()
        } else {
            Vec::new()
        };
        let mut chains: Vec<(Offset, Vec<&Mention>)> = Vec::new();
        for entity in entities.iter() {
            let unique: BTreeMap<MentionId, &Mention> =
                entity.entity.iter().map(|m| (m.id, m)).collect();
            if unique.len() < 2 && !config.include_singletons {
                continue;
            }
            let Some(first_head) = unique.values().map(|m| m.head_offset).min() else {
                continue;
            };
            chains.push((first_head, unique.into_values().collect()));
        }
        chains.sort_by_key(|(head, _)| *head);

        let groups = chains
            .into_iter()
            .enumerate()
            .map(|(i, (_, members))| {
                let mut mentions: Vec<GroupMention> = members
                    .into_iter()
                    .map(|m| {
                        let span = if config.fill_gaps {
                            m.filled_span(&full_content)
                        } else {
                            m.span.clone()
                        };
                        GroupMention {
                            mention_id: m.id,
                            text: tokens.render(&span),
                            span,
                            head: m.head_offset,
                        }
                    })
                    .collect();
                mentions.sort_by(|a, b| a.span.cmp(&b.span).then(a.mention_id.cmp(&b.mention_id)));
                CoreferenceGroup {
                    id: format!("co{}", i + 1),
                    mentions,
                }
            })
            .collect();

        Self {
            document_id,
            groups,
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no group was found.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serialize as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> OffsetStrings {
        [(0, "de"), (3, "grote"), (9, "hond"), (14, "blaft"), (20, "hij"), (24, "bijt")]
            .into_iter()
            .collect()
    }

    fn resolved() -> Entities {
        let mut entities = Entities::from_mentions([
            Mention::new(0, [0, 9], 9),
            Mention::new(1, [14], 14),
            Mention::new(2, [20], 20),
        ])
        .unwrap();
        let first = entities.find_mention(MentionId(0)).unwrap();
        let third = entities.find_mention(MentionId(2)).unwrap();
        entities.merge(first, third).unwrap();
        entities
    }

    #[test]
    fn singletons_dropped_and_gaps_filled() {
        let config = ResolverConfig::default();
        let out = CoreferenceOutput::from_entities(Some("doc".into()), &resolved(), &tokens(), &config);
        assert_eq!(out.len(), 1);
        let group = &out.groups[0];
        assert_eq!(group.id, "co1");
        assert_eq!(group.mentions[0].span, vec![0, 3, 9]);
        assert_eq!(group.mentions[0].text, "de grote hond");
        assert_eq!(group.mention_ids().collect::<Vec<_>>(), vec![MentionId(0), MentionId(2)]);
    }

    #[test]
    fn gaps_kept_on_request() {
        let config = ResolverConfig::default().with_fill_gaps(false);
        let out = CoreferenceOutput::from_entities(None, &resolved(), &tokens(), &config);
        assert_eq!(out.groups[0].mentions[0].span, vec![0, 9]);
        assert_eq!(out.groups[0].mentions[0].text, "de hond");
    }

    #[test]
    fn singletons_numbered_by_first_head() {
        let config = ResolverConfig::default().with_singletons(true);
        let out = CoreferenceOutput::from_entities(None, &resolved(), &tokens(), &config);
        let ids: Vec<(&str, usize)> = out.groups.iter().map(|g| (g.id.as_str(), g.len())).collect();
        assert_eq!(ids, vec![("co1", 2), ("co2", 1)]);
        assert_eq!(out.groups[1].mentions[0].head, 14);
    }

    #[test]
    fn json_omits_missing_document_id() {
        let out = CoreferenceOutput::from_entities(None, &resolved(), &tokens(), &ResolverConfig::default());
        let json = out.to_json(false).unwrap();
        assert!(!json.contains("document_id"));
        assert!(json.contains("\"mention_id\":0"));
    }
}
